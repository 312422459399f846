//! TOML configuration.
//!
//! Every section is optional and falls back to its defaults:
//!
//! ```toml
//! # mzlipid.toml
//! [search]
//! ppm_tolerance = 10.0
//! mass_resolution = 10000.0
//!
//! [export]
//! field_separator = "\t"
//! common_elements = ["row_id", "row_mz", "row_rt"]
//! identity_elements = ["Name", "Formula"]
//! data_file_elements = ["peak_status", "peak_area"]
//!
//! [logratio]
//! measurement = "height"
//!
//! [rules]
//! path = "custom_rules.toml"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::export::{ExportCommonElement, ExportDataFileElement, ExportError, ExportSettings};
use crate::logratio::MeasurementType;
use crate::rules::{RuleSet, RuleSetError};

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Unusable search parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unusable export setting
    #[error("Invalid export setting: {0}")]
    Export(#[from] ExportError),

    /// Rule file could not be loaded
    #[error("Rule set error: {0}")]
    Rules(#[from] RuleSetError),
}

/// Tolerances handed to every query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParameters {
    /// Mass tolerance in ppm
    pub ppm_tolerance: f64,
    /// Instrument mass resolving power
    pub mass_resolution: f64,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            ppm_tolerance: 10.0,
            mass_resolution: 10_000.0,
        }
    }
}

impl SearchParameters {
    /// Create parameters
    pub fn new(ppm_tolerance: f64, mass_resolution: f64) -> Self {
        Self {
            ppm_tolerance,
            mass_resolution,
        }
    }

    /// Both values must be finite and positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ppm_tolerance.is_finite() && self.ppm_tolerance > 0.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "ppm_tolerance must be positive, got {}",
                self.ppm_tolerance
            )));
        }
        if !(self.mass_resolution.is_finite() && self.mass_resolution > 0.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "mass_resolution must be positive, got {}",
                self.mass_resolution
            )));
        }
        Ok(())
    }
}

/// `[export]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Single ASCII character
    pub field_separator: String,
    /// Row-level columns
    pub common_elements: Vec<ExportCommonElement>,
    /// Identity property names
    pub identity_elements: Vec<String>,
    /// Per-sample columns
    pub data_file_elements: Vec<ExportDataFileElement>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let settings = ExportSettings::default();
        Self {
            field_separator: (settings.field_separator as char).to_string(),
            common_elements: settings.common_elements,
            identity_elements: settings.identity_elements,
            data_file_elements: settings.data_file_elements,
        }
    }
}

/// `[logratio]` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogratioConfig {
    /// Area or height
    pub measurement: MeasurementType,
}

/// `[rules]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// TOML or JSON rule file replacing the reference tables; relative
    /// paths from [`Config::from_str`] are taken as given (process CWD)
    pub path: Option<PathBuf>,
}

/// Root configuration for mzlipid.toml files
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search tolerances
    pub search: SearchParameters,
    /// Export column selection
    pub export: ExportConfig,
    /// Log-ratio dataset settings
    pub logratio: LogratioConfig,
    /// Custom rule tables
    pub rules: RulesConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A relative `[rules] path` is resolved against the directory holding
    /// the config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_str(&content)?;

        let resolved = match (&config.rules.path, path.parent()) {
            (Some(rules_path), Some(base)) if rules_path.is_relative() => {
                Some(base.join(rules_path))
            }
            _ => None,
        };
        if resolved.is_some() {
            config.rules.path = resolved;
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string and validate it
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.search.validate()?;
        config.export_settings()?;
        Ok(config)
    }

    /// Export settings from the `[export]` section
    pub fn export_settings(&self) -> Result<ExportSettings, ConfigError> {
        let settings = ExportSettings {
            common_elements: self.export.common_elements.clone(),
            identity_elements: self.export.identity_elements.clone(),
            data_file_elements: self.export.data_file_elements.clone(),
            ..Default::default()
        }
        .with_separator(&self.export.field_separator)?;
        if settings.is_empty() {
            return Err(ExportError::NoColumns.into());
        }
        Ok(settings)
    }

    /// Rule set named by `[rules] path`, or the reference set.
    ///
    /// Files ending in `.json` are read as JSON, anything else as TOML.
    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        let Some(path) = &self.rules.path else {
            return Ok(RuleSet::reference());
        };

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let set = if is_json {
            let content = std::fs::read_to_string(path).map_err(RuleSetError::from)?;
            RuleSet::from_json_str(&content)?
        } else {
            RuleSet::from_toml_file(path)?
        };
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [search]
            ppm_tolerance = 5.0
            mass_resolution = 60000.0

            [export]
            field_separator = ";"
            common_elements = ["row_id", "row_peak_number"]
            identity_elements = ["Name", "Formula"]
            data_file_elements = ["peak_status", "peak_height"]

            [logratio]
            measurement = "height"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.search, SearchParameters::new(5.0, 60_000.0));
        assert_eq!(config.logratio.measurement, MeasurementType::Height);

        let export = config.export_settings().unwrap();
        assert_eq!(export.field_separator, b';');
        assert_eq!(
            export.common_elements,
            vec![ExportCommonElement::RowId, ExportCommonElement::RowPeakNumber]
        );
        assert_eq!(
            export.data_file_elements,
            vec![ExportDataFileElement::PeakStatus, ExportDataFileElement::PeakHeight]
        );
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [search]
            ppm_tolerance = 3.0
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.search.ppm_tolerance, 3.0);
        assert_eq!(config.search.mass_resolution, 10_000.0);
        assert_eq!(config.export_settings().unwrap(), ExportSettings::default());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rule_set().unwrap(), RuleSet::reference());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_str("[search]\nppm_tolerance = -1.0"),
            Err(ConfigError::InvalidParameter(_))
        ));
        assert!(matches!(
            Config::from_str("[search]\nmass_resolution = 0.0"),
            Err(ConfigError::InvalidParameter(_))
        ));
        assert!(matches!(
            Config::from_str("[export]\nfield_separator = \"::\""),
            Err(ConfigError::Export(ExportError::InvalidSeparator(_)))
        ));
        assert!(matches!(
            Config::from_str("[export]\ncommon_elements = [\"row_color\"]"),
            Err(ConfigError::TomlError(_))
        ));
    }

    #[test]
    fn test_rule_file_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let rules_path = dir.path().join("rules.toml");
        let mut file = std::fs::File::create(&rules_path).unwrap();
        writeln!(
            file,
            r#"
            [[validation]]
            rt_min = 0.0
            rt_max = 60.0
            class_name_substring = "FA"
            "#
        )
        .unwrap();

        let config_path = dir.path().join("mzlipid.toml");
        std::fs::write(
            &config_path,
            format!("[rules]\npath = {:?}\n", rules_path.to_string_lossy()),
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();
        let set = config.rule_set().unwrap();
        assert_eq!(set.validation.len(), 1);
        assert_eq!(set.classification.len(), 13);
    }

    #[test]
    fn test_relative_rule_path_follows_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("rules")).unwrap();
        std::fs::write(
            dir.path().join("rules").join("custom.json"),
            r#"{"validation": [{"rt_min": 0.0, "rt_max": 60.0, "class_name_substring": "FA"}]}"#,
        )
        .unwrap();

        let config_path = dir.path().join("mzlipid.toml");
        std::fs::write(&config_path, "[rules]\npath = \"rules/custom.json\"\n").unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(
            config.rules.path.as_deref(),
            Some(dir.path().join("rules").join("custom.json").as_path())
        );
        assert_eq!(config.rule_set().unwrap().validation.len(), 1);

        // Parsed from a string there is no base directory
        let config = Config::from_str("[rules]\npath = \"rules/custom.json\"").unwrap();
        assert_eq!(config.rules.path, Some(PathBuf::from("rules/custom.json")));
    }

    #[test]
    fn test_missing_rule_file() {
        let config = Config {
            rules: RulesConfig {
                path: Some(PathBuf::from("/nonexistent/rules.json")),
            },
            ..Default::default()
        };
        assert!(matches!(
            config.rule_set(),
            Err(ConfigError::Rules(RuleSetError::IoError(_)))
        ));
    }
}
