use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ChartKind {
    CombinedFigure,
    ScatterPlot,
    CorrectAnswerHistogram,
    CorrectAnswersVsAbility,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::CombinedFigure,
        ChartKind::ScatterPlot,
        ChartKind::CorrectAnswerHistogram,
        ChartKind::CorrectAnswersVsAbility,
    ];

    /// Name of the template slot the chart is rendered into.
    pub fn slot(self) -> &'static str {
        match self {
            ChartKind::CombinedFigure => "combined_figure",
            ChartKind::ScatterPlot => "scatter_plot",
            ChartKind::CorrectAnswerHistogram => "correct_answer_histogram",
            ChartKind::CorrectAnswersVsAbility => "correct_answers_vs_ability",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slot())
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to load {}: {reason}", path.display())]
    DataLoad { path: PathBuf, reason: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("chart {chart} failed: {reason}")]
    Chart { chart: ChartKind, reason: String },
}

impl DashboardError {
    pub fn data_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DashboardError::DataLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn chart(chart: ChartKind, reason: impl fmt::Display) -> Self {
        DashboardError::Chart {
            chart,
            reason: reason.to_string(),
        }
    }

    /// The chart that failed, if this error came from a chart builder.
    pub fn failed_chart(&self) -> Option<ChartKind> {
        match self {
            DashboardError::Chart { chart, .. } => Some(*chart),
            _ => None,
        }
    }
}

pub type DashResult<T> = std::result::Result<T, DashboardError>;
