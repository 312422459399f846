//! # Delimited-Text Export
//!
//! Writes an aligned peak list as one delimited row per feature. Columns are
//! chosen from three groups, in this order:
//!
//! 1. Row-level values ([`ExportCommonElement`]): ID, averaged m/z, averaged
//!    RT in **minutes**, comment, number of detected sample peaks.
//! 2. Properties of the row's preferred identity, by property name. Missing
//!    identity or property gives an empty cell.
//! 3. Per-sample values ([`ExportDataFileElement`]) repeated for every sample
//!    of the peak list, in sample order. A sample without a peak in the row
//!    gives `N/A`.
//!
//! A selection that yields no columns at all is an error rather than a file
//! of blank lines. The exporter writes to any [`std::io::Write`]; opening
//! files is left to the caller.

mod error;
mod writer;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

pub use error::ExportError;
pub use writer::{CsvExporter, ExportSettings, ExportStats, NOT_AVAILABLE};

/// Row-level export columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportCommonElement {
    /// Row identifier
    RowId,
    /// Averaged m/z
    RowMz,
    /// Averaged retention time in minutes
    RowRt,
    /// Row comment
    RowComment,
    /// Number of sample peaks with detected status
    RowPeakNumber,
}

impl ExportCommonElement {
    /// All elements in their conventional order
    pub const ALL: [ExportCommonElement; 5] = [
        Self::RowId,
        Self::RowMz,
        Self::RowRt,
        Self::RowComment,
        Self::RowPeakNumber,
    ];

    /// Column header
    pub fn label(&self) -> &'static str {
        match self {
            Self::RowId => "Row ID",
            Self::RowMz => "Row m/z",
            Self::RowRt => "Row retention time",
            Self::RowComment => "Row comment",
            Self::RowPeakNumber => "Row number of detected peaks",
        }
    }
}

/// Per-sample export columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportDataFileElement {
    /// Detection status
    PeakStatus,
    /// Sample m/z
    PeakMz,
    /// Sample retention time in seconds
    PeakRt,
    /// Apex height
    PeakHeight,
    /// Integrated area
    PeakArea,
}

impl ExportDataFileElement {
    /// All elements in their conventional order
    pub const ALL: [ExportDataFileElement; 5] = [
        Self::PeakStatus,
        Self::PeakMz,
        Self::PeakRt,
        Self::PeakHeight,
        Self::PeakArea,
    ];

    /// Column header suffix; the full header is `"<sample> <label>"`
    pub fn label(&self) -> &'static str {
        match self {
            Self::PeakStatus => "peak status",
            Self::PeakMz => "peak m/z",
            Self::PeakRt => "peak RT",
            Self::PeakHeight => "peak height",
            Self::PeakArea => "peak area",
        }
    }
}
