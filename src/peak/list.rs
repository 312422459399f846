use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Peak, PeakStatus};
use crate::identity::SimpleCompoundIdentity;

/// One sample's peak within an aligned row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePeak {
    /// Detection status
    #[serde(default)]
    pub status: PeakStatus,
    /// Mass-to-charge ratio in this sample
    pub mz: f64,
    /// Retention time in seconds in this sample
    pub rt: f64,
    /// Apex height
    pub height: f64,
    /// Integrated area
    pub area: f64,
}

impl SamplePeak {
    /// Create a detected sample peak
    pub fn detected(mz: f64, rt: f64, height: f64, area: f64) -> Self {
        Self {
            status: PeakStatus::Detected,
            mz,
            rt,
            height,
            area,
        }
    }

    /// Set the detection status
    pub fn with_status(mut self, status: PeakStatus) -> Self {
        self.status = status;
        self
    }
}

/// A single aligned feature across all samples of a peak list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakListRow {
    /// Row identifier, unique within the peak list
    pub id: u32,

    /// Average m/z over all sample peaks
    pub average_mz: f64,

    /// Average retention time in seconds over all sample peaks
    pub average_rt: f64,

    /// Free-form comment
    pub comment: Option<String>,

    /// Sample name -> peak, for samples where the feature was found
    #[serde(default)]
    pub peaks: BTreeMap<String, SamplePeak>,

    /// Identity chosen for this row, if any
    pub preferred_identity: Option<SimpleCompoundIdentity>,
}

impl PeakListRow {
    /// Create an empty row at the given averaged position
    pub fn new(id: u32, average_mz: f64, average_rt: f64) -> Self {
        Self {
            id,
            average_mz,
            average_rt,
            comment: None,
            peaks: BTreeMap::new(),
            preferred_identity: None,
        }
    }

    /// Add a sample peak (builder style)
    pub fn with_peak(mut self, sample: impl Into<String>, peak: SamplePeak) -> Self {
        self.peaks.insert(sample.into(), peak);
        self
    }

    /// Attach a comment (builder style)
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach the preferred identity (builder style)
    pub fn with_identity(mut self, identity: SimpleCompoundIdentity) -> Self {
        self.preferred_identity = Some(identity);
        self
    }

    /// The averaged feature position used for classification
    pub fn as_peak(&self) -> Peak {
        Peak::new(self.average_mz, self.average_rt)
    }

    /// Peak for the given sample, if the feature was found there
    pub fn peak(&self, sample: &str) -> Option<&SamplePeak> {
        self.peaks.get(sample)
    }

    /// Number of sample peaks with [`PeakStatus::Detected`]
    pub fn detected_peak_count(&self) -> usize {
        self.peaks
            .values()
            .filter(|p| p.status == PeakStatus::Detected)
            .count()
    }
}

/// An aligned peak list: rows of features over an ordered set of samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakList {
    /// Display name
    pub name: String,

    /// Sample names in column order
    pub samples: Vec<String>,

    /// Aligned rows
    pub rows: Vec<PeakListRow>,
}

impl PeakList {
    /// Create an empty peak list over the given samples
    pub fn new(name: impl Into<String>, samples: Vec<String>) -> Self {
        Self {
            name: name.into(),
            samples,
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push_row(&mut self, row: PeakListRow) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the list has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the sample belongs to this peak list
    pub fn has_sample(&self, sample: &str) -> bool {
        self.samples.iter().any(|s| s == sample)
    }
}
