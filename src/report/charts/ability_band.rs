use super::{ChartFragment, tag};
use crate::core::aggregate::ParticipantSummary;
use crate::core::error::{ChartKind, DashResult};
use crate::core::stats::{mean, min_max, sample_sd, sd_or_zero};
use crate::report::svg::{self, BLUE, Frame, LIGHT_SKY_BLUE, LegendEntry, Swatch};
use anyhow::{Result, bail};
use std::fmt::Write as FmtWrite;

const FRAME: Frame = Frame {
    w: 1000.0,
    h: 450.0,
    left: 90.0,
    right: 170.0,
    top: 60.0,
    bottom: 70.0,
};
const TITLE: &str = "Correct Answers vs Ability";
const TITLE_SIZE: u32 = 22;
const AXIS_TITLE_SIZE: u32 = 23;
const TICK_SIZE: u32 = 19;
const LEGEND_SIZE: u32 = 18;

/// Ability statistics of all participants sharing one correct-answer total.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilityGroup {
    pub sum_answ: f64,
    pub mean: f64,
    /// Sample sd; 0 for a single participant.
    pub sd: f64,
    pub n: usize,
}

/// Groups by distinct `sum_answ`, ascending.
pub fn ability_groups(summary: &ParticipantSummary) -> Vec<AbilityGroup> {
    let mut pairs: Vec<(f64, f64)> = summary
        .rows
        .iter()
        .map(|r| (r.sum_answ, r.ability))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut groups = Vec::new();
    let mut start = 0;
    while start < pairs.len() {
        let key = pairs[start].0;
        let end = start + pairs[start..].iter().take_while(|p| p.0 == key).count();
        let abilities: Vec<f64> = pairs[start..end].iter().map(|p| p.1).collect();
        groups.push(AbilityGroup {
            sum_answ: key,
            mean: mean(&abilities).unwrap_or(f64::NAN),
            sd: sd_or_zero(sample_sd(&abilities)),
            n: abilities.len(),
        });
        start = end;
    }
    groups
}

/// Closed +/-1 sd outline: mean+sd forward, then mean-sd in reverse.
pub fn band_polygon(groups: &[AbilityGroup]) -> Vec<(f64, f64)> {
    let upper = groups.iter().map(|g| (g.sum_answ, g.mean + g.sd));
    let lower = groups.iter().rev().map(|g| (g.sum_answ, g.mean - g.sd));
    upper.chain(lower).collect()
}

pub fn correct_answers_vs_ability(summary: &ParticipantSummary) -> DashResult<ChartFragment> {
    let kind = ChartKind::CorrectAnswersVsAbility;
    let groups = ability_groups(summary);
    tracing::debug!(
        groups = groups.len(),
        largest = groups.iter().map(|g| g.n).max().unwrap_or(0),
        "ability groups built"
    );
    let svg = tag(kind, render_svg(&groups))?;
    Ok(ChartFragment::wrap(kind, svg, "", ""))
}

fn render_svg(groups: &[AbilityGroup]) -> Result<String> {
    if groups.is_empty() {
        bail!("no participants to plot");
    }
    let polygon = band_polygon(groups);
    let xs: Vec<f64> = groups.iter().map(|g| g.sum_answ).collect();
    let ys: Vec<f64> = polygon.iter().map(|p| p.1).collect();
    let Some((x_lo, x_hi)) = min_max(&xs) else {
        bail!("correct-answer totals are not finite");
    };
    let Some((y_lo, y_hi)) = min_max(&ys) else {
        bail!("ability values are not finite");
    };
    let (x_min, x_max) = svg::padded_range(x_lo, x_hi, 0.02);
    let (y_min, y_max) = svg::padded_range(y_lo, y_hi, 0.08);

    let frame = FRAME;
    let mut out = String::with_capacity(16 * 1024);
    svg::open_svg(&mut out, &frame, "correct_answers_vs_ability-svg")?;
    svg::draw_y_axis_ticks(&mut out, &frame, y_min, y_max, 6, TICK_SIZE)?;
    svg::draw_x_axis_ticks(&mut out, &frame, x_min, x_max, 8, TICK_SIZE)?;

    let to_px = |(x, y): &(f64, f64)| (frame.x_px(*x, x_min, x_max), frame.y_px(*y, y_min, y_max));
    let band_px: Vec<(f64, f64)> = polygon.iter().map(&to_px).collect();
    writeln!(
        out,
        "<path class=\"sd-band\" d=\"{}\" fill=\"{}\" stroke=\"none\"/>",
        svg::path_data(&band_px, true)?,
        LIGHT_SKY_BLUE
    )?;
    let mean_px: Vec<(f64, f64)> = groups
        .iter()
        .map(|g| to_px(&(g.sum_answ, g.mean)))
        .collect();
    writeln!(
        out,
        "<path class=\"mean-line\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>",
        svg::path_data(&mean_px, false)?,
        BLUE
    )?;

    svg::draw_axis_labels(&mut out, &frame, "Correct Answers", "Ability", AXIS_TITLE_SIZE)?;
    svg::draw_title(&mut out, &frame, TITLE, TITLE_SIZE)?;
    svg::draw_legend(
        &mut out,
        frame.left + frame.plot_w() + 16.0,
        frame.top,
        &[
            LegendEntry {
                label: "SD".to_string(),
                swatch: Swatch::Box {
                    fill: LIGHT_SKY_BLUE,
                    opacity: 1.0,
                },
            },
            LegendEntry {
                label: "Mean Value".to_string(),
                swatch: Swatch::Line {
                    stroke: BLUE,
                    width: 2.0,
                },
            },
        ],
        LEGEND_SIZE,
    )?;
    svg::close_svg(&mut out)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../../tests/src_inline/report/charts/ability_band.rs"]
mod tests;
