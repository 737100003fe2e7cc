use super::{ChartFragment, tag};
use crate::core::dataset::RawDataset;
use crate::core::error::{ChartKind, DashResult};
use crate::core::stats::{Correlation, Regression, linregress, linspace, min_max, pearson};
use crate::report::svg::{self, BLUE, Frame, LegendEntry, RED, Swatch};
use anyhow::{Result, bail};
use std::fmt::Write as FmtWrite;

const FRAME: Frame = Frame {
    w: 1000.0,
    h: 550.0,
    left: 100.0,
    right: 30.0,
    top: 70.0,
    bottom: 80.0,
};
const TITLE: &str = "Correlation between Item Difficulty (IRT) and Average Time Spent per item";
const TITLE_SIZE: u32 = 22;
const AXIS_TITLE_SIZE: u32 = 22;
const TICK_SIZE: u32 = 19;
const LEGEND_SIZE: u32 = 18;
const MARKER_RADIUS: f64 = 7.5;
const MARKER_OPACITY: f64 = 0.5;

/// Fitted line sampled across the observed time range.
#[derive(Clone, Debug, PartialEq)]
pub struct RegressionLine {
    pub fit: Regression,
    pub correlation: Option<Correlation>,
    pub points: Vec<(f64, f64)>,
}

impl RegressionLine {
    pub fn label(&self) -> String {
        let r = self
            .correlation
            .map(|c| format!("{:.2}", c.r))
            .unwrap_or_else(|| "n/a".to_string());
        format!("corcoeff = {}, p = {:.4}", r, self.fit.p_value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScatterData {
    /// (time spent in seconds, IRT difficulty) per item.
    pub points: Vec<(f64, f64)>,
    pub line: Option<RegressionLine>,
}

pub fn scatter_data(dataset: &RawDataset, samples: usize) -> ScatterData {
    let x = dataset.time_spent_seconds();
    let y = dataset.difficulties();
    let points: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    let line = linregress(&x, &y).and_then(|fit| {
        let (lo, hi) = min_max(&x)?;
        let points = linspace(lo, hi, samples)
            .into_iter()
            .map(|xv| (xv, fit.predict(xv)))
            .collect();
        Some(RegressionLine {
            fit,
            correlation: pearson(&x, &y),
            points,
        })
    });
    ScatterData { points, line }
}

pub fn scatter_plot(dataset: &RawDataset, samples: usize) -> DashResult<ChartFragment> {
    let kind = ChartKind::ScatterPlot;
    let data = scatter_data(dataset, samples);
    if let Some(line) = &data.line {
        tracing::debug!(
            slope = line.fit.slope,
            intercept = line.fit.intercept,
            r = line.fit.r,
            p = line.correlation.map(|c| c.p_value).unwrap_or(line.fit.p_value),
            stderr = line.fit.stderr,
            "regression fitted"
        );
    } else {
        tracing::warn!(
            items = data.points.len(),
            "regression undefined: fewer than two distinct time values"
        );
    }
    let svg = tag(kind, render_svg(&data))?;
    let note = if data.line.is_none() {
        "<p class=\"chart-note\">Regression undefined: fewer than two distinct time values.</p>\n"
    } else {
        ""
    };
    Ok(ChartFragment::wrap(kind, svg, "", note))
}

fn render_svg(data: &ScatterData) -> Result<String> {
    if data.points.is_empty() {
        bail!("no items to plot");
    }
    let xs: Vec<f64> = data.points.iter().map(|p| p.0).collect();
    let mut ys: Vec<f64> = data.points.iter().map(|p| p.1).collect();
    if let Some(line) = &data.line {
        ys.extend(line.points.iter().map(|p| p.1));
    }
    let Some((x_lo, x_hi)) = min_max(&xs) else {
        bail!("time values are not finite");
    };
    let Some((y_lo, y_hi)) = min_max(&ys) else {
        bail!("difficulty values are not finite");
    };
    let (x_min, x_max) = svg::padded_range(x_lo, x_hi, 0.05);
    let (y_min, y_max) = svg::padded_range(y_lo, y_hi, 0.08);

    let frame = FRAME;
    let mut out = String::with_capacity(32 * 1024);
    svg::open_svg(&mut out, &frame, "scatter_plot-svg")?;
    svg::draw_y_axis_ticks(&mut out, &frame, y_min, y_max, 6, TICK_SIZE)?;
    svg::draw_x_axis_ticks(&mut out, &frame, x_min, x_max, 8, TICK_SIZE)?;

    writeln!(out, "<g fill=\"{}\" fill-opacity=\"{}\">", BLUE, MARKER_OPACITY)?;
    for (x, y) in &data.points {
        writeln!(
            out,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\"><title>{:.2} s, {:.3}</title></circle>",
            frame.x_px(*x, x_min, x_max),
            frame.y_px(*y, y_min, y_max),
            MARKER_RADIUS,
            x,
            y
        )?;
    }
    writeln!(out, "</g>")?;

    let mut legend = vec![LegendEntry {
        label: "items".to_string(),
        swatch: Swatch::Dot {
            fill: BLUE,
            opacity: MARKER_OPACITY,
        },
    }];
    if let Some(line) = &data.line {
        let px: Vec<(f64, f64)> = line
            .points
            .iter()
            .map(|(x, y)| (frame.x_px(*x, x_min, x_max), frame.y_px(*y, y_min, y_max)))
            .collect();
        writeln!(
            out,
            "<path class=\"regression\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"/>",
            svg::path_data(&px, false)?,
            RED
        )?;
        legend.push(LegendEntry {
            label: line.label(),
            swatch: Swatch::Line {
                stroke: RED,
                width: 1.5,
            },
        });
    }

    svg::draw_axis_labels(&mut out, &frame, "Time Spent (s)", "IRT difficulty", AXIS_TITLE_SIZE)?;
    svg::draw_title(&mut out, &frame, TITLE, TITLE_SIZE)?;
    svg::draw_legend(
        &mut out,
        frame.left + frame.plot_w() * 0.65,
        frame.top + 8.0,
        &legend,
        LEGEND_SIZE,
    )?;
    svg::close_svg(&mut out)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../../tests/src_inline/report/charts/scatter.rs"]
mod tests;
