use crate::cli::args::{Cli, Commands, DataArgs, InitConfigArgs, RenderArgs, SummaryArgs};
use crate::core::config::DashboardConfig;
use crate::core::engine;
use crate::report;
use crate::report::summary::SummaryFormat;
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

pub fn entry() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    match cli.command {
        Commands::Render(args) => render(args),
        Commands::Summary(args) => summary(args),
        Commands::InitConfig(args) => init_config(args),
    }
}

/// `RUST_LOG` wins over `-v`/`-q` when set.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().as_str().to_ascii_lowercase()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: tracing subscriber already installed");
    }
}

/// Config file (explicit, else `./kira-verbalviz.toml`, else defaults), then flag overrides.
pub(crate) fn resolve_config(data: &DataArgs) -> Result<DashboardConfig> {
    let mut cfg = match &data.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::load_default(Path::new("."))?.unwrap_or_default(),
    };
    if let Some(dir) = &data.base_dir {
        cfg.data.base_dir = dir.clone();
    }
    if let Some(n) = data.participants {
        cfg.data.participant_count = n;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn render(args: RenderArgs) -> Result<()> {
    let stats = stats_enabled();
    let t0 = Instant::now();

    let t_cfg = Instant::now();
    let mut cfg = resolve_config(&args.data)?;
    if let Some(template) = &args.template {
        cfg.report.template = Some(template.clone());
    }
    stage_done(stats, "config", t_cfg);

    let (out_dir, stem) = stage_value(stats, "preflight", || output_location(&args.out))?;
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output dir {}", out_dir.display()))?;

    let t_engine = Instant::now();
    let output = engine::run(&cfg)?;
    stage_done(stats, "engine", t_engine);
    if stats {
        let dataset_path = cfg.dataset_path();
        eprintln!(
            "KIRA_STATS input={} bytes={} items={} participants={} abilities={}",
            dataset_path.display(),
            file_size(&dataset_path),
            output.dataset.n_items(),
            output.summary.len(),
            output.ability.ability.len()
        );
    }

    let t_charts = Instant::now();
    let page = report::page::render(&cfg, &output).inspect_err(|e| {
        if let Some(chart) = e.failed_chart() {
            tracing::error!(chart = %chart, "chart build failed");
        }
    })?;
    stage_done(stats, "charts", t_charts);

    let t_html = Instant::now();
    report::html::write(&args.out, &page.html)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    stage_done(stats, "html", t_html);
    report_output(stats, "html", &args.out);
    tracing::info!(out = %args.out.display(), bytes = page.html.len(), "page written");

    let mut bundled: Vec<PathBuf> = Vec::new();
    if let Some(name) = args.out.file_name() {
        bundled.push(PathBuf::from(name));
    }

    if args.export_figures {
        let t_fig = Instant::now();
        let written = report::figures::write(&out_dir, &page.fragments)
            .with_context(|| "failed to export figures")?;
        stage_done(stats, "figures", t_fig);
        tracing::info!(dir = %out_dir.join(report::figures::FIGURES_DIR).display(), files = written.len(), "figures exported");
        bundled.extend(written);
    }

    if args.bundle {
        let t_zip = Instant::now();
        let summary_name = PathBuf::from(format!("{}_summary.csv", stem));
        let summary_path = out_dir.join(&summary_name);
        report::summary::write(&summary_path, &output.summary, SummaryFormat::Csv)
            .with_context(|| format!("failed to write {}", summary_path.display()))?;
        bundled.push(summary_name);
        let zip_path = report::zip::write_bundle(&out_dir, &stem, &bundled)
            .with_context(|| "failed to create zip output")?;
        stage_done(stats, "zip", t_zip);
        report_output(stats, "zip", &zip_path);
        tracing::info!(out = %zip_path.display(), entries = bundled.len(), "bundle written");
    }

    if stats {
        eprintln!("KIRA_STATS output_dir={}", out_dir.display());
        eprintln!("KIRA_STATS total={}", fmt_dur(t0.elapsed()));
    }
    Ok(())
}

fn summary(args: SummaryArgs) -> Result<()> {
    let stats = stats_enabled();
    let t0 = Instant::now();

    let cfg = resolve_config(&args.data)?;
    let format = SummaryFormat::from_path(&args.out)?;
    let (out_dir, _) = output_location(&args.out)?;
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create output dir {}", out_dir.display()))?;

    let t_engine = Instant::now();
    let output = engine::run(&cfg)?;
    stage_done(stats, "engine", t_engine);

    let t_write = Instant::now();
    report::summary::write(&args.out, &output.summary, format)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    stage_done(stats, "summary", t_write);
    report_output(stats, "summary", &args.out);
    tracing::info!(out = %args.out.display(), rows = output.summary.len(), "summary written");

    if stats {
        eprintln!("KIRA_STATS total={}", fmt_dur(t0.elapsed()));
    }
    Ok(())
}

fn init_config(args: InitConfigArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "{} already exists; pass --force to overwrite",
            args.path.display()
        );
    }
    fs::write(&args.path, DashboardConfig::default_toml()?)
        .with_context(|| format!("failed to write {}", args.path.display()))?;
    tracing::info!(path = %args.path.display(), "default configuration written");
    Ok(())
}

/// Directory and file stem of an output path.
pub(crate) fn output_location(out: &Path) -> Result<(PathBuf, String)> {
    let stem = out
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .with_context(|| format!("output path {} has no file name", out.display()))?;
    let dir = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, stem))
}

fn stats_enabled() -> bool {
    matches!(env::var("KIRA_STATS").as_deref(), Ok("1"))
}

fn stage_value<T, F>(stats: bool, name: &str, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let t = Instant::now();
    let res = f();
    if stats {
        eprintln!("KIRA_STATS stage={} time={}", name, fmt_dur(t.elapsed()));
    }
    res
}

fn stage_done(stats: bool, name: &str, t: Instant) {
    if stats {
        eprintln!("KIRA_STATS stage={} time={}", name, fmt_dur(t.elapsed()));
    }
}

fn report_output(stats: bool, label: &str, path: &Path) {
    if stats {
        eprintln!(
            "KIRA_STATS output {}={} bytes={}",
            label,
            path.display(),
            file_size(path)
        );
    }
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/cli/run.rs"]
mod tests;
