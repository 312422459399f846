//! End-to-end test: config -> annotation -> CSV export -> log-ratio points

use std::collections::HashMap;
use std::convert::Infallible;
use std::fs;

use mzlipid::prelude::*;
use tempfile::tempdir;

/// In-memory compound database keyed by expected class abbreviation
struct MemoryDatabase {
    entries: HashMap<&'static str, Vec<&'static str>>,
}

impl MemoryDatabase {
    fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert("TAG", vec!["TAG 52:2", "DAG 36:2"]);
        entries.insert("GPCho/GPEtn/GPIns/GPSer", vec!["GPCho 34:1", "SM d18:1/16:0"]);
        entries.insert("SM", vec!["SM d18:1/16:0"]);
        Self { entries }
    }
}

impl CompoundDatabase for MemoryDatabase {
    type Identity = SimpleCompoundIdentity;
    type Error = Infallible;

    fn search(&self, query: &Query) -> Result<Vec<SimpleCompoundIdentity>, Infallible> {
        Ok(self
            .entries
            .get(query.expected_class_abbrev.as_str())
            .map(|names| names.iter().map(|n| SimpleCompoundIdentity::new(*n)).collect())
            .unwrap_or_default())
    }
}

fn sample_list() -> PeakList {
    let samples = vec!["ctrl_1".to_string(), "ctrl_2".to_string(), "case_1".to_string()];
    let mut list = PeakList::new("plasma_lipids", samples);

    list.push_row(
        PeakListRow::new(1, 885.55, 450.0)
            .with_peak("ctrl_1", SamplePeak::detected(885.55, 449.0, 900.0, 40000.0))
            .with_peak("ctrl_2", SamplePeak::detected(885.56, 451.0, 700.0, 24000.0))
            .with_peak("case_1", SamplePeak::detected(885.55, 450.0, 400.0, 16000.0)),
    );
    list.push_row(
        PeakListRow::new(2, 760.585, 360.0)
            .with_peak("ctrl_1", SamplePeak::detected(760.58, 359.0, 1200.0, 45000.0))
            .with_peak("case_1", SamplePeak::detected(760.59, 361.0, 800.0, 45000.0)),
    );
    list.push_row(
        PeakListRow::new(3, 300.0, 330.0)
            .with_peak("ctrl_2", SamplePeak::detected(300.0, 330.0, 50.0, 1000.0)),
    );

    list
}

#[test]
fn test_annotate_then_export() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("mzlipid.toml");
    fs::write(
        &config_path,
        r#"
[search]
ppm_tolerance = 5.0
mass_resolution = 30000.0

[export]
field_separator = ";"
common_elements = ["row_id", "row_mz", "row_rt"]
identity_elements = ["Name"]
data_file_elements = ["peak_area"]
"#,
    )
    .unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let rule_set = config.rule_set().unwrap();
    let annotator = LipidAnnotator::new(
        QueryBuilder::new(&rule_set.classification),
        IdentityValidator::new(&rule_set.validation),
        config.search,
    );

    let mut list = sample_list();
    let summary = annotator.annotate_peak_list(&list, &MemoryDatabase::new()).unwrap();
    assert_eq!(summary.rows, 3);

    // "DAG 36:2" is offered for the TAG query but fails the 0-400 s DAG window;
    // "SM d18:1/16:0" passes at 360 s for both GPCho and SM queries.
    let accepted: Vec<(u32, &str)> = summary
        .annotations
        .iter()
        .map(|(row, a)| (*row, a.identity.name.as_str()))
        .collect();
    assert_eq!(
        accepted,
        vec![
            (1, "TAG 52:2"),
            (2, "GPCho 34:1"),
            (2, "SM d18:1/16:0"),
            (2, "SM d18:1/16:0"),
        ]
    );

    // Keep the first accepted identity per row
    for (row_id, annotation) in &summary.annotations {
        if let Some(row) = list.rows.iter_mut().find(|r| r.id == *row_id) {
            if row.preferred_identity.is_none() {
                row.preferred_identity = Some(annotation.identity.clone());
            }
        }
    }

    let exporter = CsvExporter::new(config.export_settings().unwrap());
    let mut out = Vec::new();
    let stats = exporter.export(&list, &mut out).unwrap();
    assert_eq!(stats.rows_written, 3);
    assert_eq!(stats.finished_fraction(), 1.0);

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "Row ID;Row m/z;Row retention time;Name;ctrl_1 peak area;ctrl_2 peak area;case_1 peak area"
    );
    assert_eq!(lines[1], "1;885.55;7.5;TAG 52:2;40000;24000;16000");
    assert_eq!(lines[2], "2;760.585;6;GPCho 34:1;45000;N/A;45000");
    assert_eq!(lines[3], "3;300;5.5;;N/A;1000;N/A");
}

#[test]
fn test_logratio_over_annotated_list() {
    let list = sample_list();
    let dataset =
        LogratioDataset::new(&list, &["ctrl_1", "ctrl_2"], &["case_1"], MeasurementType::Area)
            .unwrap();

    assert_eq!(
        dataset.title(),
        "Logratio analysis (Logratio of average peak areas in 2 vs. 1 files)"
    );

    // Row 3 has no case_1 peak and drops out
    assert_eq!(dataset.len(), 2);
    let first = dataset.item(0).unwrap();
    assert_eq!(first.row_id, 1);
    assert!((first.logratio - 1.0).abs() < 1e-12);
    assert_eq!(dataset.item(1).unwrap().logratio, 0.0);
}

#[test]
fn test_unknown_sample_is_rejected() {
    let list = sample_list();
    let err = LogratioDataset::new(&list, &["ctrl_9"], &["case_1"], MeasurementType::Height)
        .unwrap_err();
    assert!(matches!(err, LogratioError::UnknownSample(name) if name == "ctrl_9"));
}
