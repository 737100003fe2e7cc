use anyhow::Result;
use std::fmt::Write as FmtWrite;

pub const BLUE: &str = "#0000ff";
pub const LIGHT_GREEN: &str = "#90ee90";
pub const RED: &str = "#ff0000";
pub const LIGHT_SKY_BLUE: &str = "#87cefa";
pub const DARK_SLATE_GREY: &str = "#2f4f4f";

/// Pixel geometry of one chart: outer size and plot-area margins.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    pub w: f64,
    pub h: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Frame {
    pub fn plot_w(&self) -> f64 {
        self.w - self.left - self.right
    }

    pub fn plot_h(&self) -> f64 {
        self.h - self.top - self.bottom
    }

    pub fn x_px(&self, v: f64, min: f64, max: f64) -> f64 {
        let range = (max - min).max(1e-9);
        self.left + (v - min) / range * self.plot_w()
    }

    pub fn y_px(&self, v: f64, min: f64, max: f64) -> f64 {
        let range = (max - min).max(1e-9);
        self.top + self.plot_h() - (v - min) / range * self.plot_h()
    }
}

pub fn open_svg(out: &mut String, frame: &Frame, id: &str) -> Result<()> {
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" font-family=\"Arial, Helvetica, sans-serif\">",
        id, frame.w, frame.h, frame.w, frame.h
    )?;
    writeln!(
        out,
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"#fff\"/>",
        frame.w, frame.h
    )?;
    writeln!(
        out,
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#e5ecf6\"/>",
        frame.left,
        frame.top,
        frame.plot_w(),
        frame.plot_h()
    )?;
    Ok(())
}

pub fn close_svg(out: &mut String) -> Result<()> {
    writeln!(out, "</svg>")?;
    Ok(())
}

pub fn draw_title(out: &mut String, frame: &Frame, title: &str, font_size: u32) -> Result<()> {
    writeln!(
        out,
        "<text class=\"chart-title\" x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"#2a3f5f\">{}</text>",
        frame.left,
        (frame.top * 0.5).max(font_size as f64),
        font_size,
        escape_svg(title)
    )?;
    Ok(())
}

pub fn draw_y_axis_ticks(
    out: &mut String,
    frame: &Frame,
    min_y: f64,
    max_y: f64,
    ticks: usize,
    font_size: u32,
) -> Result<()> {
    if ticks < 2 || (max_y - min_y).abs() < 1e-9 {
        return Ok(());
    }
    let (start, step, count) = nice_ticks(min_y, max_y, ticks);
    for i in 0..count {
        let v = start + step * i as f64;
        if v < min_y - 1e-9 || v > max_y + 1e-9 {
            continue;
        }
        let y = frame.y_px(v, min_y, max_y);
        writeln!(
            out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#fff\"/>",
            frame.left,
            y,
            frame.left + frame.plot_w(),
            y
        )?;
        writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"#444\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>",
            frame.left - 6.0,
            y,
            font_size,
            fmt_tick(v)
        )?;
    }
    Ok(())
}

pub fn draw_y_axis_ticks_right(
    out: &mut String,
    frame: &Frame,
    min_y: f64,
    max_y: f64,
    ticks: usize,
    font_size: u32,
) -> Result<()> {
    if ticks < 2 || (max_y - min_y).abs() < 1e-9 {
        return Ok(());
    }
    let (start, step, count) = nice_ticks(min_y, max_y, ticks);
    for i in 0..count {
        let v = start + step * i as f64;
        if v < min_y - 1e-9 || v > max_y + 1e-9 {
            continue;
        }
        let y = frame.y_px(v, min_y, max_y);
        writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"#444\" text-anchor=\"start\" dominant-baseline=\"middle\">{}</text>",
            frame.left + frame.plot_w() + 6.0,
            y,
            font_size,
            fmt_tick(v)
        )?;
    }
    Ok(())
}

pub fn draw_x_axis_ticks(
    out: &mut String,
    frame: &Frame,
    min_x: f64,
    max_x: f64,
    ticks: usize,
    font_size: u32,
) -> Result<()> {
    if ticks < 2 || (max_x - min_x).abs() < 1e-9 {
        return Ok(());
    }
    let (start, step, count) = nice_ticks(min_x, max_x, ticks);
    for i in 0..count {
        let v = start + step * i as f64;
        if v < min_x - 1e-9 || v > max_x + 1e-9 {
            continue;
        }
        let x = frame.x_px(v, min_x, max_x);
        writeln!(
            out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"#fff\"/>",
            x,
            frame.top,
            x,
            frame.top + frame.plot_h()
        )?;
        writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"#444\" text-anchor=\"middle\" dominant-baseline=\"hanging\">{}</text>",
            x,
            frame.top + frame.plot_h() + 6.0,
            font_size,
            fmt_tick(v)
        )?;
    }
    Ok(())
}

/// Category labels centred under each slot, rotated clockwise by `angle` degrees.
pub fn draw_x_category_labels(
    out: &mut String,
    frame: &Frame,
    labels: &[String],
    angle: f64,
    font_size: u32,
) -> Result<()> {
    if labels.is_empty() {
        return Ok(());
    }
    let slot = frame.plot_w() / labels.len() as f64;
    let y = frame.top + frame.plot_h() + 8.0;
    for (i, label) in labels.iter().enumerate() {
        let x = frame.left + (i as f64 + 0.5) * slot;
        writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"#444\" text-anchor=\"start\" transform=\"rotate({} {} {})\">{}</text>",
            x,
            y,
            font_size,
            angle,
            x,
            y,
            escape_svg(label)
        )?;
    }
    Ok(())
}

pub fn draw_axis_labels(
    out: &mut String,
    frame: &Frame,
    x_label: &str,
    y_label: &str,
    font_size: u32,
) -> Result<()> {
    let x = frame.left + frame.plot_w() / 2.0;
    let y = frame.h - 8.0;
    writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"#2a3f5f\" text-anchor=\"middle\">{}</text>",
        x,
        y,
        font_size,
        escape_svg(x_label)
    )?;
    let yx = (font_size as f64).max(frame.left - 56.0);
    let yy = frame.top + frame.plot_h() / 2.0;
    writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"#2a3f5f\" text-anchor=\"middle\" transform=\"rotate(-90 {} {})\">{}</text>",
        yx,
        yy,
        font_size,
        yx,
        yy,
        escape_svg(y_label)
    )?;
    Ok(())
}

pub fn draw_y_label_right(out: &mut String, frame: &Frame, label: &str, font_size: u32) -> Result<()> {
    let yx = frame.left + frame.plot_w() + 56.0;
    let yy = frame.top + frame.plot_h() / 2.0;
    writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"#2a3f5f\" text-anchor=\"middle\" transform=\"rotate(90 {} {})\">{}</text>",
        yx,
        yy,
        font_size,
        yx,
        yy,
        escape_svg(label)
    )?;
    Ok(())
}

pub enum Swatch<'a> {
    Box { fill: &'a str, opacity: f64 },
    Line { stroke: &'a str, width: f64 },
    Dot { fill: &'a str, opacity: f64 },
}

pub struct LegendEntry<'a> {
    pub label: String,
    pub swatch: Swatch<'a>,
}

/// Vertical legend with its top-left corner at `(x, y)`.
pub fn draw_legend(out: &mut String, x: f64, y: f64, entries: &[LegendEntry], font_size: u32) -> Result<()> {
    let row_h = font_size as f64 + 8.0;
    for (i, e) in entries.iter().enumerate() {
        let cy = y + row_h * (i as f64 + 0.5);
        match e.swatch {
            Swatch::Box { fill, opacity } => writeln!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"18\" height=\"12\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\"/>",
                x,
                cy - 6.0,
                fill,
                opacity,
                DARK_SLATE_GREY
            )?,
            Swatch::Line { stroke, width } => writeln!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                x,
                cy,
                x + 18.0,
                cy,
                stroke,
                width
            )?,
            Swatch::Dot { fill, opacity } => writeln!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"6\" fill=\"{}\" fill-opacity=\"{}\"/>",
                x + 9.0,
                cy,
                fill,
                opacity
            )?,
        }
        writeln!(
            out,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"#2a3f5f\" dominant-baseline=\"middle\">{}</text>",
            x + 24.0,
            cy,
            font_size,
            escape_svg(&e.label)
        )?;
    }
    Ok(())
}

/// SVG path data through `points`, already in pixel space.
pub fn path_data(points: &[(f64, f64)], close: bool) -> Result<String> {
    let mut path = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        if i == 0 {
            write!(path, "M {:.2} {:.2}", x, y)?;
        } else {
            write!(path, " L {:.2} {:.2}", x, y)?;
        }
    }
    if close && !points.is_empty() {
        path.push_str(" Z");
    }
    Ok(path)
}

pub fn fmt_tick(v: f64) -> String {
    if (v - v.round()).abs() < 0.001 {
        format!("{}", v.round() as i64)
    } else if v.abs() < 10.0 {
        format!("{:.2}", v)
    } else {
        format!("{:.1}", v)
    }
}

pub fn nice_ticks(min: f64, max: f64, ticks: usize) -> (f64, f64, usize) {
    let range = (max - min).abs().max(1e-9);
    let rough = range / (ticks as f64 - 1.0);
    let mag = 10f64.powf(rough.abs().log10().floor());
    let norm = rough / mag;
    let step = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    } * mag;
    let start = (min / step).floor() * step;
    let end = (max / step).ceil() * step;
    let count = ((end - start) / step).round() as usize + 1;
    (start, step, count)
}

/// Data range widened by `pad` of its span on each side.
pub fn padded_range(lo: f64, hi: f64, pad: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < 1e-9 {
        let half = if lo.abs() < 1e-9 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - half, hi + half);
    }
    (lo - span * pad, hi + span * pad)
}

pub fn escape_svg(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/svg.rs"]
mod tests;
