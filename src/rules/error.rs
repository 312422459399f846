/// Errors that can occur while loading or checking a rule set
#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    /// I/O error reading a rule file
    #[error("Failed to read rule file: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A rule with unusable bounds
    #[error("Invalid {table} rule #{index}: {reason}")]
    InvalidRule {
        /// Which table the rule belongs to
        table: &'static str,
        /// Zero-based position in the table
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// A table that was provided but holds no rules
    #[error("The {0} table is empty")]
    EmptyTable(&'static str),
}
