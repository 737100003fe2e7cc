use super::*;
use crate::core::model::Quartile;

fn summary() -> ParticipantSummary {
    ParticipantSummary {
        rows: vec![
            ParticipantRow {
                id: 0,
                sum_answ: 12.0,
                mean_answ: Some(0.5),
                sd_answ: Some(0.25),
                sum_temp: 3000.0,
                mean_temp: Some(1500.0),
                sd_temp: None,
                ability: -0.75,
            },
            ParticipantRow {
                id: 1,
                sum_answ: 31.0,
                mean_answ: None,
                sd_answ: None,
                sum_temp: 0.0,
                mean_temp: None,
                sd_temp: None,
                ability: 1.5,
            },
        ],
    }
}

#[test]
fn test_format_from_extension() {
    assert_eq!(
        SummaryFormat::from_path(Path::new("out/summary.csv")).unwrap(),
        SummaryFormat::Csv
    );
    assert_eq!(
        SummaryFormat::from_path(Path::new("SUMMARY.JSON")).unwrap(),
        SummaryFormat::Json
    );
    assert!(SummaryFormat::from_path(Path::new("summary.txt")).is_err());
    assert!(SummaryFormat::from_path(Path::new("summary")).is_err());
}

#[test]
fn test_csv_rows() {
    let mut buf = Vec::new();
    write_csv(&mut buf, &summary()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "id,sum_answ,mean_answ,sd_answ,sum_temp,mean_temp,sd_temp,ability,quartile",
            "0,12,0.5,0.25,3000,1500,0,-0.75,Q2",
            "1,31,,0,0,,0,1.5,Q4",
        ]
    );
}

#[test]
fn test_json_rows() {
    let mut buf = Vec::new();
    write_json(&mut buf, &summary()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], 0);
    assert_eq!(rows[0]["sum_answ"], 12.0);
    assert_eq!(rows[0]["sd_temp"], serde_json::Value::Null);
    assert_eq!(rows[0]["quartile"], Quartile::Q2.as_str());
    assert_eq!(rows[1]["quartile"], "Q4");
    assert_eq!(rows[1]["ability"], 1.5);
}

#[test]
fn test_write_to_file() {
    let path = std::env::temp_dir().join(format!(
        "kira_verbalviz_summary_{}.csv",
        std::process::id()
    ));
    write(&path, &summary(), SummaryFormat::Csv).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    std::fs::remove_file(&path).unwrap();
}
