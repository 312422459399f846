//! # Feature Data Model
//!
//! Chromatographic features as the classification core and its collaborators
//! see them. A [`Peak`] is the bare (m/z, RT) pair the rule tables are tested
//! against; a [`PeakList`] is an aligned table of features across samples, as
//! produced by upstream peak detection and alignment.
//!
//! Retention times are stored in seconds throughout the crate.

mod list;


use serde::{Deserialize, Serialize};
use std::fmt;

pub use list::{PeakList, PeakListRow, SamplePeak};

/// A detected chromatographic feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Mass-to-charge ratio
    pub mz: f64,
    /// Retention time in seconds
    pub rt: f64,
}

impl Peak {
    /// Create a new peak
    pub fn new(mz: f64, rt: f64) -> Self {
        Self { mz, rt }
    }

    /// Whether the peak can be classified at all (`mz > 0` and `rt >= 0`)
    pub fn is_classifiable(&self) -> bool {
        self.mz > 0.0 && self.rt >= 0.0
    }
}

impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m/z {:.4} @ {:.2} s", self.mz, self.rt)
    }
}

/// How a sample peak came to exist in an aligned row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakStatus {
    /// Origin not recorded
    #[default]
    Unknown,
    /// Found by peak detection
    Detected,
    /// Filled in by gap filling
    Estimated,
    /// Picked by hand
    Manual,
}

impl fmt::Display for PeakStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeakStatus::Unknown => write!(f, "UNKNOWN"),
            PeakStatus::Detected => write!(f, "DETECTED"),
            PeakStatus::Estimated => write!(f, "ESTIMATED"),
            PeakStatus::Manual => write!(f, "MANUAL"),
        }
    }
}
