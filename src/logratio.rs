//! # Log-Ratio Dataset
//!
//! Builds the data behind an RT vs. m/z scatter plot colored by the log2
//! ratio of average intensities between two groups of samples. Rendering is
//! someone else's job; this module only computes the points.
//!
//! A row contributes a point when at least one sample of each group has a
//! peak in it. The ratio is `log2(mean(group one) / mean(group two))`, and
//! `NaN` when the group-two mean is zero.

use log::trace;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::peak::{PeakList, PeakListRow, SamplePeak};

/// Errors that can occur while building a log-ratio dataset
#[derive(Debug, thiserror::Error)]
pub enum LogratioError {
    /// A sample group with no samples selected
    #[error("No samples selected for group {0}")]
    EmptyGroup(u8),

    /// A selected sample that the peak list does not contain
    #[error("Sample '{0}' is not part of the peak list")]
    UnknownSample(String),
}

/// Which intensity measure to compare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementType {
    /// Integrated peak area
    #[default]
    Area,
    /// Peak apex height
    Height,
}

impl MeasurementType {
    fn value(&self, peak: &SamplePeak) -> f64 {
        match self {
            MeasurementType::Area => peak.area,
            MeasurementType::Height => peak.height,
        }
    }

    fn plural(&self) -> &'static str {
        match self {
            MeasurementType::Area => "areas",
            MeasurementType::Height => "heights",
        }
    }
}

/// One plotted feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogratioItem {
    /// Source row
    pub row_id: u32,
    /// X: retention time in seconds
    pub rt: f64,
    /// Y: m/z
    pub mz: f64,
    /// Z: log2 ratio of group averages
    pub logratio: f64,
}

/// Points for a log-ratio RT/m/z plot
#[derive(Debug, Clone)]
pub struct LogratioDataset {
    title: String,
    items: Vec<LogratioItem>,
}

impl LogratioDataset {
    /// Compute the dataset over `peak_list` for the two sample groups
    pub fn new<S: AsRef<str>>(
        peak_list: &PeakList,
        group_one: &[S],
        group_two: &[S],
        measurement: MeasurementType,
    ) -> Result<Self, LogratioError> {
        check_group(peak_list, group_one, 1)?;
        check_group(peak_list, group_two, 2)?;

        let title = format!(
            "Logratio analysis (Logratio of average peak {} in {} vs. {} files)",
            measurement.plural(),
            group_one.len(),
            group_two.len()
        );
        trace!("Computing: {}", title);

        let items = peak_list
            .rows
            .iter()
            .filter_map(|row| {
                let one = collect_intensities(row, group_one, measurement);
                let two = collect_intensities(row, group_two, measurement);
                if one.is_empty() || two.is_empty() {
                    return None;
                }

                let avg_one = mean(&one);
                let avg_two = mean(&two);
                let logratio = if avg_two != 0.0 {
                    (avg_one / avg_two).log2()
                } else {
                    f64::NAN
                };

                Some(LogratioItem {
                    row_id: row.id,
                    rt: row.average_rt,
                    mz: row.average_mz,
                    logratio,
                })
            })
            .collect();

        Ok(Self { title, items })
    }

    /// Dataset title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All points in peak list order
    pub fn items(&self) -> &[LogratioItem] {
        &self.items
    }

    /// Point at `index`
    pub fn item(&self, index: usize) -> Option<&LogratioItem> {
        self.items.get(index)
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no row qualified
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for LogratioDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

fn check_group<S: AsRef<str>>(
    peak_list: &PeakList,
    group: &[S],
    which: u8,
) -> Result<(), LogratioError> {
    if group.is_empty() {
        return Err(LogratioError::EmptyGroup(which));
    }
    for sample in group {
        if !peak_list.has_sample(sample.as_ref()) {
            return Err(LogratioError::UnknownSample(sample.as_ref().to_string()));
        }
    }
    Ok(())
}

fn collect_intensities<S: AsRef<str>>(
    row: &PeakListRow,
    group: &[S],
    measurement: MeasurementType,
) -> Vec<f64> {
    group
        .iter()
        .filter_map(|sample| row.peak(sample.as_ref()))
        .map(|peak| measurement.value(peak))
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peak::SamplePeak;

    fn list() -> PeakList {
        let samples = ["a1", "a2", "b1", "b2"].iter().map(|s| s.to_string()).collect();
        let mut list = PeakList::new("groups", samples);

        // Group one averages 400, group two averages 100
        list.push_row(
            PeakListRow::new(1, 760.585, 390.0)
                .with_peak("a1", SamplePeak::detected(760.58, 389.0, 10.0, 300.0))
                .with_peak("a2", SamplePeak::detected(760.58, 390.0, 30.0, 500.0))
                .with_peak("b1", SamplePeak::detected(760.59, 391.0, 20.0, 100.0)),
        );

        // Only group one present
        list.push_row(
            PeakListRow::new(2, 496.34, 120.0)
                .with_peak("a1", SamplePeak::detected(496.34, 120.0, 5.0, 50.0)),
        );

        // Group two average is zero
        list.push_row(
            PeakListRow::new(3, 885.55, 440.0)
                .with_peak("a2", SamplePeak::detected(885.55, 440.0, 5.0, 50.0))
                .with_peak("b2", SamplePeak::detected(885.55, 440.0, 0.0, 0.0)),
        );

        list
    }

    #[test]
    fn test_logratio_of_areas() {
        let dataset =
            LogratioDataset::new(&list(), &["a1", "a2"], &["b1", "b2"], MeasurementType::Area)
                .unwrap();

        assert_eq!(dataset.len(), 2);
        let first = dataset.item(0).unwrap();
        assert_eq!(first.row_id, 1);
        assert_eq!(first.rt, 390.0);
        assert_eq!(first.mz, 760.585);
        assert!((first.logratio - 2.0).abs() < 1e-12);

        let zero = dataset.item(1).unwrap();
        assert_eq!(zero.row_id, 3);
        assert!(zero.logratio.is_nan());
        assert!(dataset.item(2).is_none());
    }

    #[test]
    fn test_logratio_of_heights() {
        let dataset =
            LogratioDataset::new(&list(), &["a1", "a2"], &["b1"], MeasurementType::Height)
                .unwrap();

        // Row 3 has no b1 peak, so only row 1 qualifies; 20 / 20 -> 0
        assert_eq!(dataset.len(), 1);
        assert!(dataset.items()[0].logratio.abs() < 1e-12);
        assert_eq!(
            dataset.to_string(),
            "Logratio analysis (Logratio of average peak heights in 2 vs. 1 files)"
        );
    }

    #[test]
    fn test_group_errors() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            LogratioDataset::new(&list(), &empty, &["b1"], MeasurementType::Area),
            Err(LogratioError::EmptyGroup(1))
        ));
        assert!(matches!(
            LogratioDataset::new(&list(), &["a1"], &["zz"], MeasurementType::Area),
            Err(LogratioError::UnknownSample(s)) if s == "zz"
        ));
    }
}
