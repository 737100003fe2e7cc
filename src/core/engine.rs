use crate::core::ability::AbilityParameters;
use crate::core::aggregate::{Aggregator, ParticipantSummary};
use crate::core::config::DashboardConfig;
use crate::core::dataset::RawDataset;
use crate::core::error::DashResult;
use std::time::Instant;

/// Everything one page request needs, loaded fresh from disk.
pub struct RunOutput {
    pub dataset: RawDataset,
    pub ability: AbilityParameters,
    pub summary: ParticipantSummary,
}

pub fn run(cfg: &DashboardConfig) -> DashResult<RunOutput> {
    cfg.validate()?;

    let t_load = Instant::now();
    let dataset_path = cfg.dataset_path();
    let dataset = RawDataset::load(&dataset_path, cfg.data.participant_count)?;
    let ability_path = cfg.ability_path();
    let ability = AbilityParameters::load(&ability_path)?;
    tracing::info!(
        dataset = %dataset_path.display(),
        ability = %ability_path.display(),
        items = dataset.n_items(),
        participants = dataset.participant_count(),
        elapsed_ms = t_load.elapsed().as_millis() as u64,
        "inputs loaded"
    );

    let t_agg = Instant::now();
    let summary = Aggregator::new(cfg).summarize(&dataset, &ability)?;
    tracing::info!(
        rows = summary.len(),
        elapsed_ms = t_agg.elapsed().as_millis() as u64,
        "participant summary ready"
    );

    Ok(RunOutput {
        dataset,
        ability,
        summary,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/core/engine.rs"]
mod tests;
