use super::{ChartFragment, tag};
use crate::core::aggregate::ParticipantSummary;
use crate::core::error::{ChartKind, DashResult, DashboardError};
use crate::core::model::Quartile;
use crate::core::stats::min_max;
use crate::report::svg::{self, BLUE, DARK_SLATE_GREY, Frame, LegendEntry, Swatch};
use anyhow::{Result, bail};
use std::fmt::Write as FmtWrite;

const FRAME: Frame = Frame {
    w: 1000.0,
    h: 450.0,
    left: 90.0,
    right: 130.0,
    top: 60.0,
    bottom: 70.0,
};
const TITLE: &str = "Histogram of Correct Answers Distribution";
const TITLE_SIZE: u32 = 22;
const AXIS_TITLE_SIZE: u32 = 23;
const TICK_SIZE: u32 = 19;
const LEGEND_SIZE: u32 = 18;

pub fn quartile_opacity(q: Quartile) -> f64 {
    match q {
        Quartile::Q1 => 0.2,
        Quartile::Q2 => 0.4,
        Quartile::Q3 => 0.55,
        Quartile::Q4 => 0.7,
    }
}

/// Equal-width bin with per-quartile counts, indexed by `Quartile::index`.
#[derive(Clone, Debug, PartialEq)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub counts: [usize; 4],
}

impl HistogramBin {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bins `values` over their observed range; the last bin is closed on the right.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let Some((lo, hi)) = min_max(values) else {
        return Vec::new();
    };
    let bins = bins.max(1);
    let (lo, hi) = if (hi - lo).abs() < 1e-9 {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    };
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect();
    let mut out: Vec<HistogramBin> = edges
        .windows(2)
        .map(|e| HistogramBin {
            lo: e[0],
            hi: e[1],
            counts: [0; 4],
        })
        .collect();
    // Placement uses the drawn edges.
    let lower = &edges[..bins];
    for &v in values.iter().filter(|v| v.is_finite()) {
        let idx = lower.partition_point(|e| *e <= v).saturating_sub(1).min(bins - 1);
        out[idx].counts[Quartile::categorize(v).index()] += 1;
    }
    out
}

pub fn correct_answer_histogram(
    summary: &ParticipantSummary,
    bins: usize,
) -> DashResult<ChartFragment> {
    let kind = ChartKind::CorrectAnswerHistogram;
    if summary.is_empty() {
        return Err(DashboardError::chart(kind, "no participants to plot"));
    }
    let data = histogram_bins(&summary.sum_answ(), bins);
    let svg = tag(kind, render_svg(&data))?;
    Ok(ChartFragment::wrap(kind, svg, "", ""))
}

fn render_svg(bins: &[HistogramBin]) -> Result<String> {
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        bail!("no participants to plot");
    };
    let x_min = first.lo;
    let x_max = last.hi;
    let max_count = bins.iter().map(HistogramBin::total).max().unwrap_or(0);
    let y_max = (max_count as f64 * 1.05).max(1.0);

    let frame = FRAME;
    let mut out = String::with_capacity(32 * 1024);
    svg::open_svg(&mut out, &frame, "correct_answer_histogram-svg")?;
    svg::draw_y_axis_ticks(&mut out, &frame, 0.0, y_max, 5, TICK_SIZE)?;
    svg::draw_x_axis_ticks(&mut out, &frame, x_min, x_max, 8, TICK_SIZE)?;

    for q in Quartile::ALL {
        writeln!(
            out,
            "<g data-quartile=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"2\">",
            q.as_str(),
            BLUE,
            quartile_opacity(q),
            DARK_SLATE_GREY
        )?;
        for b in bins {
            let count = b.counts[q.index()];
            if count == 0 {
                continue;
            }
            // Stack above the lower quartiles of the same bin.
            let below: usize = b.counts[..q.index()].iter().sum();
            let y_top = frame.y_px((below + count) as f64, 0.0, y_max);
            let y_bottom = frame.y_px(below as f64, 0.0, y_max);
            let x0 = frame.x_px(b.lo, x_min, x_max);
            let x1 = frame.x_px(b.hi, x_min, x_max);
            writeln!(
                out,
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"><title>{} [{}, {}): {}</title></rect>",
                x0,
                y_top,
                (x1 - x0).max(1.0),
                y_bottom - y_top,
                q.as_str(),
                svg::fmt_tick(b.lo),
                svg::fmt_tick(b.hi),
                count
            )?;
        }
        writeln!(out, "</g>")?;
    }

    let legend: Vec<LegendEntry> = Quartile::ALL
        .iter()
        .filter(|q| bins.iter().any(|b| b.counts[q.index()] > 0))
        .map(|q| LegendEntry {
            label: q.as_str().to_string(),
            swatch: Swatch::Box {
                fill: BLUE,
                opacity: quartile_opacity(*q),
            },
        })
        .collect();

    svg::draw_axis_labels(&mut out, &frame, "Correct Answers", "count", AXIS_TITLE_SIZE)?;
    svg::draw_title(&mut out, &frame, TITLE, TITLE_SIZE)?;
    svg::draw_legend(
        &mut out,
        frame.left + frame.plot_w() + 16.0,
        frame.top,
        &legend,
        LEGEND_SIZE,
    )?;
    svg::close_svg(&mut out)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../../tests/src_inline/report/charts/histogram.rs"]
mod tests;
