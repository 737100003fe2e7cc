use super::*;
use crate::core::ability::AbilityParameters;
use crate::core::aggregate::Aggregator;
use crate::core::dataset::{Item, RawDataset};
use crate::core::error::{ChartKind, DashboardError};
use std::path::PathBuf;

fn run_output(participants: usize) -> RunOutput {
    let items: Vec<Item> = [("sun", -0.4, 3000.0), ("meadow", 0.3, 7000.0), ("zephyr", 1.6, 14000.0)]
        .iter()
        .map(|(w, d, ms)| Item {
            words: w.to_string(),
            difficulty: *d,
            answ_mean: 0.5,
            temp_mean_ms: *ms,
        })
        .collect();
    let answ = vec![vec![5.0, 5.0, 5.0]; participants];
    let temp = vec![vec![1000.0, 2000.0, 3000.0]; participants];
    let dataset = RawDataset::from_columns(items, answ, temp).unwrap();
    let ability = AbilityParameters {
        ability: vec![0.0; participants],
    };
    let summary = Aggregator::with_participants(participants)
        .summarize(&dataset, &ability)
        .unwrap();
    RunOutput {
        dataset,
        ability,
        summary,
    }
}

#[test]
fn test_render_builtin_page() {
    let mut cfg = DashboardConfig::default();
    cfg.data.participant_count = 3;
    let page = render(&cfg, &run_output(3)).unwrap();
    assert_eq!(page.fragments.len(), 4);
    assert!(page.html.starts_with("<!DOCTYPE html>"));
    assert!(page.html.contains("<h1>Verbal Test Visualisation</h1>"));
    assert!(page.html.contains("3 items, 3 participants. Source: art_generated_data.csv"));
    for kind in ChartKind::ALL {
        assert!(page.html.contains(&format!("id=\"{}\"", kind.slot())));
    }
    assert!(!page.html.contains("{{"));
}

#[test]
fn test_render_custom_template() {
    let path = std::env::temp_dir().join(format!(
        "kira_verbalviz_page_template_{}.html",
        std::process::id()
    ));
    std::fs::write(&path, "<body>{{ scatter_plot }}|{{ title }}</body>").unwrap();
    let mut cfg = DashboardConfig::default();
    cfg.report.template = Some(path.clone());
    cfg.report.title = "Pilot & Co".to_string();
    let page = render(&cfg, &run_output(2)).unwrap();
    assert!(page.html.starts_with("<body><div class=\"chart\" id=\"scatter_plot\">"));
    assert!(page.html.ends_with("|Pilot &amp; Co</body>"));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_template_is_configuration_error() {
    let mut cfg = DashboardConfig::default();
    cfg.report.template = Some(PathBuf::from("/nonexistent/kira-verbalviz/template.html"));
    let err = render(&cfg, &run_output(1)).err().unwrap();
    assert!(matches!(err, DashboardError::Configuration(_)));
}
