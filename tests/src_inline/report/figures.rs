use super::*;
use crate::core::aggregate::{ParticipantRow, ParticipantSummary};
use crate::core::config::ChartConfig;
use crate::core::dataset::{Item, RawDataset};
use crate::report::charts::build_all;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_verbalviz_figures_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn fragments() -> Vec<ChartFragment> {
    let items = vec![
        Item {
            words: "lantern".to_string(),
            difficulty: -0.2,
            answ_mean: 0.3,
            temp_mean_ms: 6000.0,
        },
        Item {
            words: "orbit".to_string(),
            difficulty: 0.9,
            answ_mean: 0.6,
            temp_mean_ms: 11000.0,
        },
    ];
    let dataset = RawDataset::from_columns(items, vec![], vec![]).unwrap();
    let summary = ParticipantSummary {
        rows: vec![ParticipantRow {
            id: 0,
            sum_answ: 21.0,
            mean_answ: None,
            sd_answ: None,
            sum_temp: 0.0,
            mean_temp: None,
            sd_temp: None,
            ability: 0.4,
        }],
    };
    build_all(&dataset, &summary, &ChartConfig::default()).unwrap()
}

#[test]
fn test_tex_includes_every_figure() {
    let tex = tex_document(&fragments());
    assert!(tex.starts_with("\\documentclass{article}"));
    assert!(tex.trim_end().ends_with("\\end{document}"));
    for kind in ChartKind::ALL {
        assert!(tex.contains(&format!("{{{}.pdf}}", kind.slot())));
        assert!(tex.contains(&format!("\\label{{fig:{}}}", kind.slot())));
    }
    assert_eq!(tex.matches("\\begin{figure}").count(), 4);
    assert!(tex.contains("\\caption{Time spent vs IRT item difficulty}"));
}

#[test]
fn test_write_svg_pdf_and_tex() {
    let dir = make_temp_dir();
    let written = write(&dir, &fragments()).unwrap();
    assert_eq!(written.len(), 9);
    assert_eq!(written.last().unwrap(), &Path::new(FIGURES_DIR).join(TEX_FILE));
    for kind in ChartKind::ALL {
        let svg = fs::read_to_string(dir.join(FIGURES_DIR).join(format!("{}.svg", kind.slot())))
            .unwrap();
        assert!(svg.starts_with("<svg xmlns="));
        let pdf = fs::read(dir.join(FIGURES_DIR).join(format!("{}.pdf", kind.slot()))).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }
    assert!(dir.join(FIGURES_DIR).join(TEX_FILE).is_file());
}
