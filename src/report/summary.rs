use crate::core::aggregate::{ParticipantRow, ParticipantSummary};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SummaryFormat {
    Csv,
    Json,
}

impl SummaryFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(SummaryFormat::Csv),
            Some("json") => Ok(SummaryFormat::Json),
            _ => bail!(
                "cannot infer summary format from {} (use .csv or .json)",
                path.display()
            ),
        }
    }
}

#[derive(Serialize)]
struct SummaryRecord<'a> {
    #[serde(flatten)]
    row: &'a ParticipantRow,
    quartile: &'static str,
}

fn records(summary: &ParticipantSummary) -> impl Iterator<Item = SummaryRecord<'_>> {
    summary.rows.iter().map(|row| SummaryRecord {
        row,
        quartile: row.quartile().as_str(),
    })
}

pub fn write(path: &Path, summary: &ParticipantSummary, format: SummaryFormat) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {} failed", path.display()))?;
    match format {
        SummaryFormat::Csv => write_csv(BufWriter::new(file), summary),
        SummaryFormat::Json => write_json(BufWriter::new(file), summary),
    }
}

pub fn write_csv<W: Write>(w: W, summary: &ParticipantSummary) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(w);
    writer.write_record([
        "id",
        "sum_answ",
        "mean_answ",
        "sd_answ",
        "sum_temp",
        "mean_temp",
        "sd_temp",
        "ability",
        "quartile",
    ])?;
    for r in &summary.rows {
        writer.write_record([
            r.id.to_string(),
            fmt_num(r.sum_answ),
            fmt_opt(r.mean_answ),
            fmt_num(r.sd_answ_or_zero()),
            fmt_num(r.sum_temp),
            fmt_opt(r.mean_temp),
            fmt_num(r.sd_temp_or_zero()),
            fmt_num(r.ability),
            r.quartile().as_str().to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut w: W, summary: &ParticipantSummary) -> Result<()> {
    let rows: Vec<SummaryRecord<'_>> = records(summary).collect();
    serde_json::to_writer_pretty(&mut w, &rows)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

fn fmt_num(v: f64) -> String {
    format!("{}", v)
}

/// Undefined means are written as empty cells.
fn fmt_opt(v: Option<f64>) -> String {
    v.map(fmt_num).unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/summary.rs"]
mod tests;
