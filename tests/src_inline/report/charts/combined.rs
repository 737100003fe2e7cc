use super::*;
use crate::core::dataset::Item;

fn dataset() -> RawDataset {
    let items = vec![
        Item {
            words: "apple".to_string(),
            difficulty: -1.0,
            answ_mean: 0.1,
            temp_mean_ms: 5000.0,
        },
        Item {
            words: "bridge".to_string(),
            difficulty: 0.2,
            answ_mean: 0.7,
            temp_mean_ms: 12000.0,
        },
        Item {
            words: "cascade".to_string(),
            difficulty: 1.1,
            answ_mean: 0.4,
            temp_mean_ms: 8000.0,
        },
    ];
    RawDataset::from_columns(items, vec![vec![1.0, 0.0, 1.0]], vec![vec![1.0, 1.0, 1.0]])
        .unwrap()
}

#[test]
fn test_series_order_and_visibility() {
    let s = bar_series(&dataset());
    let shape: Vec<(Measure, ViewMode, bool)> =
        s.iter().map(|b| (b.measure, b.ordering, b.visible)).collect();
    assert_eq!(
        shape,
        vec![
            (Measure::Mistakes, ViewMode::TimeSpent, true),
            (Measure::Time, ViewMode::TimeSpent, true),
            (Measure::Mistakes, ViewMode::AverageMistakes, false),
            (Measure::Time, ViewMode::AverageMistakes, false),
        ]
    );
    let vis: Vec<bool> = s.iter().map(|b| b.visible).collect();
    assert_eq!(vis, ViewMode::TimeSpent.visibility().to_vec());
}

#[test]
fn test_series_axes_colors_opacity() {
    let s = bar_series(&dataset());
    assert_eq!(s[0].axis, Axis::Secondary);
    assert_eq!(s[1].axis, Axis::Primary);
    assert_eq!(s[0].color, LIGHT_GREEN);
    assert_eq!(s[1].color, BLUE);
    assert_eq!(
        s.iter().map(|b| b.opacity).collect::<Vec<_>>(),
        vec![0.5, 1.0, 1.0, 0.45]
    );
    assert_eq!(s[1].name, TIME_SERIES_NAME);
    assert_eq!(s[2].name, MISTAKES_SERIES_NAME);
}

#[test]
fn test_orderings_are_descending() {
    let s = bar_series(&dataset());
    assert_eq!(s[1].labels, vec!["bridge", "cascade", "apple"]);
    assert_eq!(s[1].values, vec![12.0, 8.0, 5.0]);
    assert_eq!(s[0].labels, s[1].labels);
    assert_eq!(s[0].values, vec![0.7, 0.4, 0.1]);
    assert_eq!(s[2].labels, vec!["bridge", "cascade", "apple"]);
    assert_eq!(s[2].values, vec![0.7, 0.4, 0.1]);
    assert_eq!(s[3].values, vec![12.0, 8.0, 5.0]);
}

#[test]
fn test_mistakes_ordering_differs_from_time_ordering() {
    let items = vec![
        Item {
            words: "slow".to_string(),
            difficulty: 0.0,
            answ_mean: 0.1,
            temp_mean_ms: 20000.0,
        },
        Item {
            words: "hard".to_string(),
            difficulty: 0.0,
            answ_mean: 0.9,
            temp_mean_ms: 3000.0,
        },
    ];
    let ds = RawDataset::from_columns(items, vec![], vec![]).unwrap();
    let s = bar_series(&ds);
    assert_eq!(s[1].labels, vec!["slow", "hard"]);
    assert_eq!(s[2].labels, vec!["hard", "slow"]);
    assert_eq!(s[3].values, vec![3.0, 20.0]);
}

#[test]
fn test_time_values_converted_once() {
    let ds = dataset();
    let first = bar_series(&ds);
    let second = bar_series(&ds);
    assert_eq!(first[1].values, second[1].values);
    assert_eq!(second[1].values[2], 5.0);
}

#[test]
fn test_fragment_has_selector_and_hidden_series() {
    let frag = combined_figure(&dataset()).unwrap();
    assert_eq!(frag.kind, ChartKind::CombinedFigure);
    assert!(frag.html.starts_with("<div class=\"chart\" id=\"combined_figure\">"));
    assert!(frag.html.contains("<select id=\"combined_figure-view\""));
    assert!(frag.html.contains("data-visible=\"[true,true,false,false]\""));
    assert!(frag.html.contains("data-visible=\"[false,false,true,true]\""));
    assert!(frag.html.contains("Average Mistakes per Question"));
    assert!(frag.html.contains("<script>"));
    assert!(frag.svg.contains("data-series=\"0\" display=\"inline\""));
    assert!(frag.svg.contains("data-series=\"3\" display=\"none\""));
    assert!(frag.svg.contains("Time Spent on Each Question"));
    assert!(!frag.svg.contains("<script>"));
}

#[test]
fn test_empty_dataset_fails_with_chart_error() {
    let ds = RawDataset::from_columns(vec![], vec![], vec![]).unwrap();
    let err = combined_figure(&ds).unwrap_err();
    assert_eq!(err.failed_chart(), Some(ChartKind::CombinedFigure));
}
