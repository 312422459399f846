use super::*;
use crate::identity::SimpleCompoundIdentity;
use crate::peak::{PeakList, PeakListRow, PeakStatus, SamplePeak};

fn sample_list() -> PeakList {
    let mut list = PeakList::new("lipids", vec!["ctrl_1".to_string(), "case_1".to_string()]);

    list.push_row(
        PeakListRow::new(1, 760.585, 390.0)
            .with_comment("PC 34:1")
            .with_identity(
                SimpleCompoundIdentity::new("GPCho 34:1").with_property("Formula", "C42H82NO8P"),
            )
            .with_peak("ctrl_1", SamplePeak::detected(760.58, 389.0, 1200.0, 45000.0))
            .with_peak(
                "case_1",
                SamplePeak::detected(760.59, 391.0, 800.0, 30000.0)
                    .with_status(PeakStatus::Estimated),
            ),
    );

    list.push_row(
        PeakListRow::new(2, 496.34, 120.0)
            .with_peak("case_1", SamplePeak::detected(496.34, 120.0, 300.0, 9000.0)),
    );

    list
}

fn export_to_string(exporter: &CsvExporter, list: &PeakList) -> String {
    let mut out = Vec::new();
    exporter.export(list, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_default_export() {
    let list = sample_list();
    let text = export_to_string(&CsvExporter::default(), &list);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Row ID,Row m/z,Row retention time,Name,ctrl_1 peak area,case_1 peak area"
    );
    assert_eq!(lines[1], "1,760.585,6.5,GPCho 34:1,45000,30000");
    // No identity -> blank, no ctrl peak -> N/A
    assert_eq!(lines[2], "2,496.34,2,,N/A,9000");
}

#[test]
fn test_all_columns_with_tab_separator() {
    let identity_elements = vec!["Name".to_string(), "Formula".to_string(), "ID".to_string()];
    let settings = ExportSettings::all_columns(identity_elements)
        .with_separator("\t")
        .unwrap();
    let exporter = CsvExporter::new(settings);
    let list = sample_list();
    let text = export_to_string(&exporter, &list);
    let lines: Vec<Vec<&str>> = text.lines().map(|l| l.split('\t').collect()).collect();

    // 5 common + 3 identity + 2 samples * 5 data-file columns
    assert_eq!(lines[0].len(), 18);
    assert_eq!(lines[0][4], "Row number of detected peaks");
    assert_eq!(lines[0][8], "ctrl_1 peak status");
    assert_eq!(lines[0][17], "case_1 peak area");

    let first = &lines[1];
    assert_eq!(first[3], "PC 34:1");
    assert_eq!(first[4], "1");
    assert_eq!(first[5], "GPCho 34:1");
    assert_eq!(first[6], "C42H82NO8P");
    assert_eq!(first[7], "");
    assert_eq!(first[8], "DETECTED");
    assert_eq!(first[13], "ESTIMATED");

    let second = &lines[2];
    assert_eq!(second[3], "");
    assert_eq!(&second[8..13], &["N/A"; 5]);
    assert_eq!(second[13], "DETECTED");
}

#[test]
fn test_fields_with_separator_are_quoted() {
    let mut list = PeakList::new("quoted", vec![]);
    list.push_row(PeakListRow::new(9, 100.0, 60.0).with_comment("a,b"));

    let settings = ExportSettings {
        common_elements: vec![ExportCommonElement::RowId, ExportCommonElement::RowComment],
        identity_elements: vec![],
        data_file_elements: vec![],
        ..Default::default()
    };
    let text = export_to_string(&CsvExporter::new(settings), &list);
    assert_eq!(text.lines().nth(1), Some("9,\"a,b\""));
}

#[test]
fn test_export_stats() {
    let list = sample_list();
    let stats = CsvExporter::default().export(&list, std::io::sink()).unwrap();
    assert_eq!(stats.rows_written, 2);
    assert_eq!(stats.total_rows, 2);
    assert_eq!(stats.finished_fraction(), 1.0);

    let empty = PeakList::new("empty", vec!["a".to_string()]);
    let stats = CsvExporter::default().export(&empty, std::io::sink()).unwrap();
    assert_eq!(stats.rows_written, 0);
    assert_eq!(stats.finished_fraction(), 0.0);
}

#[test]
fn test_invalid_separator() {
    assert!(matches!(
        ExportSettings::default().with_separator(";;"),
        Err(ExportError::InvalidSeparator(_))
    ));
    assert!(ExportSettings::default().with_separator("").is_err());
    assert!(ExportSettings::default().with_separator("§").is_err());
    for bad in ["\"", "\n", "\r", "\0", "\x1f", "\x7f"] {
        assert!(
            matches!(
                ExportSettings::default().with_separator(bad),
                Err(ExportError::InvalidSeparator(_))
            ),
            "separator {:?} accepted",
            bad
        );
    }
    assert_eq!(
        ExportSettings::default().with_separator(";").unwrap().field_separator,
        b';'
    );
    assert_eq!(
        ExportSettings::default().with_separator("\t").unwrap().field_separator,
        b'\t'
    );
}

#[test]
fn test_config_rejects_quote_separator() {
    assert!(matches!(
        crate::config::Config::from_str("[export]\nfield_separator = \"\\\"\""),
        Err(crate::config::ConfigError::Export(ExportError::InvalidSeparator(_)))
    ));
}

#[test]
fn test_empty_selection_is_rejected() {
    let settings = ExportSettings {
        common_elements: vec![],
        identity_elements: vec![],
        data_file_elements: vec![],
        ..Default::default()
    };
    assert!(settings.is_empty());

    let mut out = Vec::new();
    let result = CsvExporter::new(settings).export(&sample_list(), &mut out);
    assert!(matches!(result, Err(ExportError::NoColumns)));
    assert!(out.is_empty());

    // Per-sample columns only, but a peak list without samples
    let settings = ExportSettings {
        common_elements: vec![],
        identity_elements: vec![],
        ..Default::default()
    };
    let no_samples = PeakList::new("no_samples", vec![]);
    assert!(matches!(
        CsvExporter::new(settings).export(&no_samples, std::io::sink()),
        Err(ExportError::NoColumns)
    ));
}

#[test]
fn test_config_rejects_empty_selection() {
    let toml = "[export]\ncommon_elements = []\nidentity_elements = []\ndata_file_elements = []";
    assert!(matches!(
        crate::config::Config::from_str(toml),
        Err(crate::config::ConfigError::Export(ExportError::NoColumns))
    ));
}
