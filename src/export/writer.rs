use log::{debug, info};
use std::io::Write;

use super::{ExportCommonElement, ExportDataFileElement, ExportError};
use crate::identity::PROPERTY_NAME;
use crate::peak::{PeakList, PeakListRow};

/// Cell value for a sample without a peak in the row
pub const NOT_AVAILABLE: &str = "N/A";

/// Column selection and field separator for an export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Single-byte field separator
    pub field_separator: u8,

    /// Row-level columns
    pub common_elements: Vec<ExportCommonElement>,

    /// Identity property names, e.g. `"Name"`, `"Formula"`
    pub identity_elements: Vec<String>,

    /// Per-sample columns
    pub data_file_elements: Vec<ExportDataFileElement>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            field_separator: b',',
            common_elements: vec![
                ExportCommonElement::RowId,
                ExportCommonElement::RowMz,
                ExportCommonElement::RowRt,
            ],
            identity_elements: vec![PROPERTY_NAME.to_string()],
            data_file_elements: vec![ExportDataFileElement::PeakArea],
        }
    }
}

impl ExportSettings {
    /// Every available column
    pub fn all_columns(identity_elements: Vec<String>) -> Self {
        Self {
            common_elements: ExportCommonElement::ALL.to_vec(),
            identity_elements,
            data_file_elements: ExportDataFileElement::ALL.to_vec(),
            ..Default::default()
        }
    }

    /// Whether no column of any group is selected
    pub fn is_empty(&self) -> bool {
        self.common_elements.is_empty()
            && self.identity_elements.is_empty()
            && self.data_file_elements.is_empty()
    }

    /// Set the field separator from its textual form
    pub fn with_separator(mut self, separator: &str) -> Result<Self, ExportError> {
        self.field_separator = parse_separator(separator)?;
        Ok(self)
    }
}

/// Parse a single ASCII character separator; `"` and control bytes other
/// than tab are not allowed
pub(crate) fn parse_separator(separator: &str) -> Result<u8, ExportError> {
    match separator.as_bytes() {
        [b'"'] => Err(ExportError::InvalidSeparator(separator.to_string())),
        [byte] if *byte == b'\t' || (byte.is_ascii() && !byte.is_ascii_control()) => Ok(*byte),
        _ => Err(ExportError::InvalidSeparator(separator.to_string())),
    }
}

/// Statistics from an export run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Data rows written
    pub rows_written: usize,
    /// Rows in the peak list
    pub total_rows: usize,
}

impl ExportStats {
    /// Progress in `[0, 1]`; zero for an empty peak list
    pub fn finished_fraction(&self) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        self.rows_written as f64 / self.total_rows as f64
    }
}

/// Delimited-text exporter for aligned peak lists
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    settings: ExportSettings,
}

impl CsvExporter {
    /// Create an exporter with the given settings
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    /// Settings in use
    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Header cells for the given peak list
    pub fn header(&self, peak_list: &PeakList) -> Vec<String> {
        let mut header: Vec<String> = self
            .settings
            .common_elements
            .iter()
            .map(|e| e.label().to_string())
            .collect();

        header.extend(self.settings.identity_elements.iter().cloned());

        for sample in &peak_list.samples {
            for element in &self.settings.data_file_elements {
                header.push(format!("{} {}", sample, element.label()));
            }
        }

        header
    }

    /// Cells for one row
    pub fn row_cells(&self, peak_list: &PeakList, row: &PeakListRow) -> Vec<String> {
        let mut cells = Vec::with_capacity(
            self.settings.common_elements.len()
                + self.settings.identity_elements.len()
                + peak_list.samples.len() * self.settings.data_file_elements.len(),
        );

        for element in &self.settings.common_elements {
            cells.push(match element {
                ExportCommonElement::RowId => row.id.to_string(),
                ExportCommonElement::RowMz => row.average_mz.to_string(),
                ExportCommonElement::RowRt => (row.average_rt / 60.0).to_string(),
                ExportCommonElement::RowComment => row.comment.clone().unwrap_or_default(),
                ExportCommonElement::RowPeakNumber => row.detected_peak_count().to_string(),
            });
        }

        for property in &self.settings.identity_elements {
            let value = row
                .preferred_identity
                .as_ref()
                .and_then(|identity| identity.property(property))
                .unwrap_or_default();
            cells.push(value.to_string());
        }

        for sample in &peak_list.samples {
            let peak = row.peak(sample);
            for element in &self.settings.data_file_elements {
                cells.push(match peak {
                    Some(p) => match element {
                        ExportDataFileElement::PeakStatus => p.status.to_string(),
                        ExportDataFileElement::PeakMz => p.mz.to_string(),
                        ExportDataFileElement::PeakRt => p.rt.to_string(),
                        ExportDataFileElement::PeakHeight => p.height.to_string(),
                        ExportDataFileElement::PeakArea => p.area.to_string(),
                    },
                    None => NOT_AVAILABLE.to_string(),
                });
            }
        }

        cells
    }

    /// Write the header and every row of `peak_list` to `writer`.
    ///
    /// Fails with [`ExportError::NoColumns`] before writing anything when the
    /// selection yields no header cells for this peak list.
    pub fn export<W: Write>(
        &self,
        peak_list: &PeakList,
        writer: W,
    ) -> Result<ExportStats, ExportError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.settings.field_separator)
            .has_headers(false)
            .from_writer(writer);

        let mut stats = ExportStats {
            rows_written: 0,
            total_rows: peak_list.len(),
        };

        debug!(
            "Exporting peak list {} ({} rows, {} samples)",
            peak_list.name,
            stats.total_rows,
            peak_list.samples.len()
        );

        let header = self.header(peak_list);
        if header.is_empty() {
            return Err(ExportError::NoColumns);
        }
        csv_writer.write_record(header)?;

        for row in &peak_list.rows {
            csv_writer.write_record(self.row_cells(peak_list, row))?;
            stats.rows_written += 1;
        }

        csv_writer.flush()?;

        info!("Exported {} rows of peak list {}", stats.rows_written, peak_list.name);
        Ok(stats)
    }
}
