/// Errors that can occur during peak list export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error on the output sink
    #[error("Could not write export: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV writer error
    #[error("CSV writing error: {0}")]
    CsvError(#[from] csv::Error),

    /// Field separator that is not a single printable ASCII character or tab
    #[error("Invalid field separator {0:?}: must be one printable ASCII character or tab")]
    InvalidSeparator(String),

    /// Column selection that would produce no cells
    #[error("No export columns selected")]
    NoColumns,
}
