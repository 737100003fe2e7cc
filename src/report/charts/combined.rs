use super::{ChartFragment, tag};
use crate::core::dataset::RawDataset;
use crate::core::error::{ChartKind, DashResult};
use crate::core::model::ViewMode;
use crate::report::svg::{self, BLUE, Frame, LIGHT_GREEN, LegendEntry, Swatch};
use anyhow::{Result, bail};
use std::fmt::Write as FmtWrite;

const FRAME: Frame = Frame {
    w: 1100.0,
    h: 640.0,
    left: 90.0,
    right: 250.0,
    top: 90.0,
    bottom: 170.0,
};
const TITLE_SIZE: u32 = 22;
const AXIS_TITLE_SIZE: u32 = 19;
const X_TICK_SIZE: u32 = 15;
const Y_TICK_SIZE: u32 = 18;
const LEGEND_SIZE: u32 = 16;
const TICK_ANGLE: f64 = 45.0;

pub const TIME_SERIES_NAME: &str = "Time Spent (seconds)";
pub const MISTAKES_SERIES_NAME: &str = "Average Mistakes";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Measure {
    Time,
    Mistakes,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarSeries {
    pub name: &'static str,
    pub measure: Measure,
    pub ordering: ViewMode,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: &'static str,
    pub opacity: f64,
    pub axis: Axis,
    pub visible: bool,
}

struct Row<'a> {
    words: &'a str,
    seconds: f64,
    mistakes: f64,
}

fn ordered_rows(dataset: &RawDataset, view: ViewMode) -> Vec<Row<'_>> {
    let mut rows: Vec<Row<'_>> = dataset
        .items()
        .iter()
        .map(|i| Row {
            words: &i.words,
            seconds: i.time_spent_seconds(),
            mistakes: i.answ_mean,
        })
        .collect();
    match view {
        ViewMode::TimeSpent => rows.sort_by(|a, b| b.seconds.total_cmp(&a.seconds)),
        ViewMode::AverageMistakes => rows.sort_by(|a, b| b.mistakes.total_cmp(&a.mistakes)),
    }
    rows
}

fn series(
    rows: &[Row<'_>],
    ordering: ViewMode,
    measure: Measure,
    opacity: f64,
) -> BarSeries {
    let (name, color, axis) = match measure {
        Measure::Time => (TIME_SERIES_NAME, BLUE, Axis::Primary),
        Measure::Mistakes => (MISTAKES_SERIES_NAME, LIGHT_GREEN, Axis::Secondary),
    };
    BarSeries {
        name,
        measure,
        ordering,
        labels: rows.iter().map(|r| r.words.to_string()).collect(),
        values: rows
            .iter()
            .map(|r| match measure {
                Measure::Time => r.seconds,
                Measure::Mistakes => r.mistakes,
            })
            .collect(),
        color,
        opacity,
        axis,
        visible: ordering == ViewMode::TimeSpent,
    }
}

/// The four bar series in trace order: both measures under the time ordering,
/// then both under the mistakes ordering.
pub fn bar_series(dataset: &RawDataset) -> [BarSeries; 4] {
    let by_time = ordered_rows(dataset, ViewMode::TimeSpent);
    let by_mistakes = ordered_rows(dataset, ViewMode::AverageMistakes);
    [
        series(&by_time, ViewMode::TimeSpent, Measure::Mistakes, 0.5),
        series(&by_time, ViewMode::TimeSpent, Measure::Time, 1.0),
        series(&by_mistakes, ViewMode::AverageMistakes, Measure::Mistakes, 1.0),
        series(&by_mistakes, ViewMode::AverageMistakes, Measure::Time, 0.45),
    ]
}

pub fn combined_figure(dataset: &RawDataset) -> DashResult<ChartFragment> {
    let kind = ChartKind::CombinedFigure;
    let series = bar_series(dataset);
    let svg = tag(kind, render_svg(&series))?;
    let controls = tag(kind, render_selector(kind.slot()))?;
    let script = tag(kind, render_script(kind.slot()))?;
    Ok(ChartFragment::wrap(kind, svg, &controls, &script))
}

fn axis_range(series: &[BarSeries], axis: Axis) -> (f64, f64) {
    let values = series
        .iter()
        .filter(|s| s.axis == axis)
        .flat_map(|s| s.values.iter().copied());
    let (lo, hi) = values.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if (hi - lo).abs() < 1e-9 {
        (lo, lo + 1.0)
    } else {
        (lo, hi + (hi - lo) * 0.05)
    }
}

fn render_svg(series: &[BarSeries; 4]) -> Result<String> {
    let n = series[0].values.len();
    if n == 0 {
        bail!("no items to plot");
    }
    let frame = FRAME;
    let mut out = String::with_capacity(64 * 1024);
    svg::open_svg(&mut out, &frame, "combined_figure-svg")?;

    let (y1_min, y1_max) = axis_range(series, Axis::Primary);
    let (y2_min, y2_max) = axis_range(series, Axis::Secondary);
    svg::draw_y_axis_ticks(&mut out, &frame, y1_min, y1_max, 6, Y_TICK_SIZE)?;
    svg::draw_y_axis_ticks_right(&mut out, &frame, y2_min, y2_max, 6, Y_TICK_SIZE)?;

    for view in ViewMode::ALL {
        let members: Vec<usize> = (0..series.len())
            .filter(|&i| series[i].ordering == view)
            .collect();
        let Some(&first) = members.first() else {
            continue;
        };
        let visible = members.iter().any(|&i| series[i].visible);
        let any = members
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(
            out,
            "<g data-series-any=\"{}\" display=\"{}\">",
            any,
            display(visible)
        )?;
        svg::draw_x_category_labels(&mut out, &frame, &series[first].labels, TICK_ANGLE, X_TICK_SIZE)?;
        writeln!(out, "</g>")?;
    }

    let slot = frame.plot_w() / n as f64;
    let bar_w = slot * 0.4;
    for (idx, s) in series.iter().enumerate() {
        let (min, max) = match s.axis {
            Axis::Primary => (y1_min, y1_max),
            Axis::Secondary => (y2_min, y2_max),
        };
        // Time bars take the left half of each slot, mistakes the right half.
        let offset = match s.measure {
            Measure::Time => slot * 0.5 - bar_w,
            Measure::Mistakes => slot * 0.5,
        };
        writeln!(
            out,
            "<g data-series=\"{}\" display=\"{}\" fill=\"{}\" fill-opacity=\"{}\">",
            idx,
            display(s.visible),
            s.color,
            s.opacity
        )?;
        let zero = frame.y_px(0.0f64.clamp(min, max), min, max);
        for (i, v) in s.values.iter().enumerate() {
            let x = frame.left + i as f64 * slot + offset;
            let y = frame.y_px(*v, min, max);
            let (top, height) = if y <= zero { (y, zero - y) } else { (zero, y - zero) };
            writeln!(
                out,
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"><title>{}: {}</title></rect>",
                x,
                top,
                bar_w,
                height,
                svg::escape_svg(&s.labels[i]),
                svg::fmt_tick(*v)
            )?;
        }
        writeln!(out, "</g>")?;
    }

    svg::draw_axis_labels(&mut out, &frame, "Questions", TIME_SERIES_NAME, AXIS_TITLE_SIZE)?;
    svg::draw_y_label_right(&mut out, &frame, MISTAKES_SERIES_NAME, AXIS_TITLE_SIZE)?;
    svg::draw_title(&mut out, &frame, ViewMode::TimeSpent.title(), TITLE_SIZE)?;
    svg::draw_legend(
        &mut out,
        frame.left + frame.plot_w() + 90.0,
        frame.top,
        &[
            LegendEntry {
                label: MISTAKES_SERIES_NAME.to_string(),
                swatch: Swatch::Box {
                    fill: LIGHT_GREEN,
                    opacity: 1.0,
                },
            },
            LegendEntry {
                label: TIME_SERIES_NAME.to_string(),
                swatch: Swatch::Box {
                    fill: BLUE,
                    opacity: 1.0,
                },
            },
        ],
        LEGEND_SIZE,
    )?;
    svg::close_svg(&mut out)?;
    Ok(out)
}

fn display(visible: bool) -> &'static str {
    if visible { "inline" } else { "none" }
}

fn visibility_json(vis: [bool; 4]) -> String {
    let parts: Vec<&str> = vis.iter().map(|v| if *v { "true" } else { "false" }).collect();
    format!("[{}]", parts.join(","))
}

fn render_selector(slot: &str) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "<div class=\"view-selector\"><select id=\"{}-view\" aria-label=\"View\">",
        slot
    )?;
    for view in ViewMode::ALL {
        writeln!(
            out,
            "<option data-visible=\"{}\" data-title=\"{}\">{}</option>",
            visibility_json(view.visibility()),
            view.title(),
            view.label()
        )?;
    }
    writeln!(out, "</select></div>")?;
    Ok(out)
}

fn render_script(slot: &str) -> Result<String> {
    let mut out = String::new();
    out.push_str("<script>");
    write!(
        out,
        r#"(function(){{var root=document.getElementById('{slot}');if(!root){{return;}}var sel=root.querySelector('select');sel.addEventListener('change',function(){{var o=sel.options[sel.selectedIndex];var vis=JSON.parse(o.getAttribute('data-visible'));root.querySelectorAll('[data-series]').forEach(function(g){{g.setAttribute('display',vis[+g.getAttribute('data-series')]?'inline':'none');}});root.querySelectorAll('[data-series-any]').forEach(function(g){{var any=g.getAttribute('data-series-any').split(',').some(function(i){{return vis[+i];}});g.setAttribute('display',any?'inline':'none');}});var t=root.querySelector('.chart-title');if(t){{t.textContent=o.getAttribute('data-title');}}}});}})();"#
    )?;
    out.push_str("</script>\n");
    Ok(out)
}

#[cfg(test)]
#[path = "../../../tests/src_inline/report/charts/combined.rs"]
mod tests;
