use crate::core::error::ChartKind;
use crate::report::charts::ChartFragment;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use svg2pdf::usvg;
use svg2pdf::{ConversionOptions, PageOptions};

pub const FIGURES_DIR: &str = "figures";
pub const TEX_FILE: &str = "figures.tex";

fn caption(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::CombinedFigure => "Time spent and average mistakes per question",
        ChartKind::ScatterPlot => "Time spent vs IRT item difficulty",
        ChartKind::CorrectAnswerHistogram => "Distribution of correct answers by quartile",
        ChartKind::CorrectAnswersVsAbility => "Mean ability per correct-answer total",
    }
}

/// Writes `<name>.svg` and `<name>.pdf` per chart plus `figures.tex` into
/// `<out_dir>/figures`. Returns every file written, relative to `out_dir`.
pub fn write(out_dir: &Path, fragments: &[ChartFragment]) -> Result<Vec<PathBuf>> {
    let figures_dir = out_dir.join(FIGURES_DIR);
    fs::create_dir_all(&figures_dir)
        .with_context(|| format!("failed to create {}", figures_dir.display()))?;

    let mut written = Vec::with_capacity(fragments.len() * 2 + 1);
    for f in fragments {
        let name = f.kind.slot();
        let svg_path = figures_dir.join(format!("{name}.svg"));
        fs::write(&svg_path, &f.svg)
            .with_context(|| format!("failed to write {}", svg_path.display()))?;
        let pdf = svg_to_pdf(&f.svg).with_context(|| format!("failed to convert {name} to PDF"))?;
        let pdf_path = figures_dir.join(format!("{name}.pdf"));
        fs::write(&pdf_path, pdf)
            .with_context(|| format!("failed to write {}", pdf_path.display()))?;
        written.push(Path::new(FIGURES_DIR).join(format!("{name}.svg")));
        written.push(Path::new(FIGURES_DIR).join(format!("{name}.pdf")));
    }

    let tex_path = figures_dir.join(TEX_FILE);
    fs::write(&tex_path, tex_document(fragments))
        .with_context(|| format!("failed to write {}", tex_path.display()))?;
    written.push(Path::new(FIGURES_DIR).join(TEX_FILE));
    Ok(written)
}

pub fn tex_document(fragments: &[ChartFragment]) -> String {
    let mut out = String::new();
    out.push_str("\\documentclass{article}\n");
    out.push_str("\\usepackage{graphicx}\n");
    out.push_str("\\usepackage{caption}\n");
    out.push_str("\\usepackage{float}\n");
    out.push_str("\\usepackage{geometry}\n");
    out.push_str("\\geometry{margin=1in}\n");
    out.push_str("\\begin{document}\n");
    for f in fragments {
        out.push_str("\\begin{figure}[H]\n");
        out.push_str("\\centering\n");
        out.push_str(&format!(
            "\\includegraphics[width=\\linewidth]{{{}.pdf}}\n",
            f.kind.slot()
        ));
        out.push_str(&format!("\\caption{{{}}}\n", caption(f.kind)));
        out.push_str(&format!("\\label{{fig:{}}}\n", f.kind.slot()));
        out.push_str("\\end{figure}\n");
    }
    out.push_str("\\end{document}\n");
    out
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    let tree =
        usvg::Tree::from_str(svg, &opt).map_err(|e| anyhow::anyhow!("usvg parse failed: {e}"))?;
    let pdf = svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| anyhow::anyhow!("svg2pdf conversion failed: {e}"))?;
    Ok(pdf)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/figures.rs"]
mod tests;
