use super::*;
use crate::core::dataset::Item;

fn dataset(points: &[(f64, f64)]) -> RawDataset {
    let items = points
        .iter()
        .enumerate()
        .map(|(i, (ms, difficulty))| Item {
            words: format!("item{}", i),
            difficulty: *difficulty,
            answ_mean: 0.5,
            temp_mean_ms: *ms,
        })
        .collect();
    RawDataset::from_columns(items, vec![], vec![]).unwrap()
}

#[test]
fn test_points_use_seconds() {
    let ds = dataset(&[(5000.0, 0.1), (7000.0, 0.4)]);
    let data = scatter_data(&ds, 10);
    assert_eq!(data.points, vec![(5.0, 0.1), (7.0, 0.4)]);
}

#[test]
fn test_regression_line_spans_observed_range() {
    let ds = dataset(&[(1000.0, 3.0), (2000.0, 5.0), (4000.0, 9.0), (3000.0, 7.0)]);
    let data = scatter_data(&ds, 100);
    let line = data.line.unwrap();
    assert!((line.fit.slope - 2.0).abs() < 1e-12);
    assert!((line.fit.intercept - 1.0).abs() < 1e-12);
    assert!((line.correlation.unwrap().r - 1.0).abs() < 1e-12);
    assert_eq!(line.points.len(), 100);
    assert_eq!(line.points[0].0, 1.0);
    assert_eq!(line.points[99].0, 4.0);
    assert!((line.points[0].1 - 3.0).abs() < 1e-12);
    assert!((line.points[99].1 - 9.0).abs() < 1e-12);
}

#[test]
fn test_repeated_calls_do_not_rescale_time() {
    let ds = dataset(&[(5000.0, 0.1), (9000.0, 0.3)]);
    let a = scatter_data(&ds, 5);
    let b = scatter_data(&ds, 5);
    assert_eq!(a, b);
    assert_eq!(b.points[0].0, 5.0);
}

#[test]
fn test_label_format() {
    let ds = dataset(&[(1000.0, 1.0), (2000.0, 2.5), (3000.0, 2.0)]);
    let line = scatter_data(&ds, 10).line.unwrap();
    let label = line.label();
    assert!(label.starts_with("corcoeff = 0.65, p = "), "{label}");
    assert_eq!(label.rsplit("p = ").next().unwrap().len(), 6);
}

#[test]
fn test_constant_difficulty_label() {
    let ds = dataset(&[(1000.0, 1.0), (2000.0, 1.0), (3000.0, 1.0)]);
    let line = scatter_data(&ds, 10).line.unwrap();
    assert!(line.correlation.is_none());
    assert!(line.label().starts_with("corcoeff = n/a"));
    assert!(line.points.iter().all(|p| p.1 == 1.0));
}

#[test]
fn test_constant_time_has_no_line() {
    let ds = dataset(&[(4000.0, 0.1), (4000.0, 0.9), (4000.0, 0.5)]);
    let data = scatter_data(&ds, 10);
    assert!(data.line.is_none());
    let frag = scatter_plot(&ds, 10).unwrap();
    assert!(!frag.svg.contains("class=\"regression\""));
    assert!(frag.html.contains("chart-note"));
    assert_eq!(frag.svg.matches("<circle cx").count(), 3);
}

#[test]
fn test_fragment_contains_markers_and_line() {
    let ds = dataset(&[(1000.0, 0.5), (2000.0, 1.0), (3500.0, 1.2)]);
    let frag = scatter_plot(&ds, 50).unwrap();
    assert_eq!(frag.kind, ChartKind::ScatterPlot);
    assert!(frag.html.starts_with("<div class=\"chart\" id=\"scatter_plot\">"));
    assert!(frag.svg.contains("class=\"regression\""));
    assert!(frag.svg.contains("corcoeff = "));
    assert!(frag.svg.contains("Time Spent (s)"));
    assert!(frag.svg.contains("IRT difficulty"));
    assert!(!frag.html.contains("chart-note"));
}

#[test]
fn test_empty_dataset_is_chart_error() {
    let ds = dataset(&[]);
    let err = scatter_plot(&ds, 10).unwrap_err();
    assert_eq!(err.failed_chart(), Some(ChartKind::ScatterPlot));
}
