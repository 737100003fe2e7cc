pub mod ability_band;
pub mod combined;
pub mod histogram;
pub mod scatter;

use crate::core::aggregate::ParticipantSummary;
use crate::core::config::ChartConfig;
use crate::core::dataset::RawDataset;
use crate::core::error::{ChartKind, DashResult, DashboardError};

/// One rendered chart: an embeddable HTML fragment and the bare SVG behind it.
#[derive(Clone, Debug)]
pub struct ChartFragment {
    pub kind: ChartKind,
    pub html: String,
    pub svg: String,
}

impl ChartFragment {
    fn wrap(kind: ChartKind, svg: String, before: &str, after: &str) -> Self {
        let mut html = String::with_capacity(svg.len() + before.len() + after.len() + 64);
        html.push_str(&format!("<div class=\"chart\" id=\"{}\">\n", kind.slot()));
        html.push_str(before);
        html.push_str(&svg);
        html.push_str(after);
        html.push_str("</div>\n");
        Self { kind, html, svg }
    }
}

pub(crate) fn tag<T>(kind: ChartKind, res: anyhow::Result<T>) -> DashResult<T> {
    res.map_err(|e| DashboardError::chart(kind, format!("{e:#}")))
}

/// Builds the four charts in page order; the first failure names its chart.
pub fn build_all(
    dataset: &RawDataset,
    summary: &ParticipantSummary,
    cfg: &ChartConfig,
) -> DashResult<Vec<ChartFragment>> {
    let mut out = Vec::with_capacity(ChartKind::ALL.len());
    for kind in ChartKind::ALL {
        let fragment = match kind {
            ChartKind::CombinedFigure => combined::combined_figure(dataset)?,
            ChartKind::ScatterPlot => scatter::scatter_plot(dataset, cfg.regression_samples)?,
            ChartKind::CorrectAnswerHistogram => {
                histogram::correct_answer_histogram(summary, cfg.histogram_bins)?
            }
            ChartKind::CorrectAnswersVsAbility => {
                ability_band::correct_answers_vs_ability(summary)?
            }
        };
        tracing::debug!(chart = %kind, bytes = fragment.html.len(), "chart rendered");
        out.push(fragment);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../../tests/src_inline/report/charts/mod.rs"]
mod tests;
