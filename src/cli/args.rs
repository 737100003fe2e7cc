use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kira-verbalviz",
    version,
    about = "Charts and participant summaries for verbal test results"
)]
pub struct Cli {
    /// Debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dashboard page.
    Render(RenderArgs),
    /// Write the per-participant summary table.
    Summary(SummaryArgs),
    /// Write a configuration file with default values.
    InitConfig(InitConfigArgs),
}

/// Options shared by every command that loads the dataset.
#[derive(Args, Clone, Debug, Default)]
pub struct DataArgs {
    /// Configuration file. Defaults to `kira-verbalviz.toml` in the current directory when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the dataset and ability files.
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    #[arg(long)]
    pub participants: Option<usize>,
}

#[derive(Parser)]
pub struct RenderArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output HTML file.
    #[arg(long)]
    pub out: PathBuf,

    /// Page template with `{{ slot }}` placeholders.
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Also write standalone SVG and PDF figures next to the page.
    #[arg(long, default_value_t = false)]
    pub export_figures: bool,

    /// Zip the page, the summary and any figures.
    #[arg(long, default_value_t = false)]
    pub bundle: bool,
}

#[derive(Parser)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output file; `.csv` or `.json`.
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Parser)]
pub struct InitConfigArgs {
    #[arg(long, default_value = "kira-verbalviz.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long, default_value_t = false)]
    pub force: bool,
}
