use crate::core::ability::AbilityParameters;
use crate::core::config::DashboardConfig;
use crate::core::dataset::RawDataset;
use crate::core::error::{DashResult, DashboardError};
use crate::core::model::Quartile;
use crate::core::stats::{mean, sample_sd, sd_or_zero, sum};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticipantRow {
    pub id: usize,
    pub sum_answ: f64,
    pub mean_answ: Option<f64>,
    /// Raw sample sd; `None` below two observations.
    pub sd_answ: Option<f64>,
    pub sum_temp: f64,
    pub mean_temp: Option<f64>,
    pub sd_temp: Option<f64>,
    pub ability: f64,
}

impl ParticipantRow {
    pub fn sd_answ_or_zero(&self) -> f64 {
        sd_or_zero(self.sd_answ)
    }

    pub fn sd_temp_or_zero(&self) -> f64 {
        sd_or_zero(self.sd_temp)
    }

    pub fn quartile(&self) -> Quartile {
        Quartile::categorize(self.sum_answ)
    }
}

/// One row per participant, ordered by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticipantSummary {
    pub rows: Vec<ParticipantRow>,
}

impl ParticipantSummary {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sum_answ(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.sum_answ).collect()
    }
}

pub struct Aggregator {
    participant_count: usize,
}

impl Aggregator {
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_participants(config.data.participant_count)
    }

    pub fn with_participants(participant_count: usize) -> Self {
        Self { participant_count }
    }

    pub fn summarize(
        &self,
        dataset: &RawDataset,
        ability: &AbilityParameters,
    ) -> DashResult<ParticipantSummary> {
        if dataset.participant_count() < self.participant_count {
            return Err(DashboardError::Configuration(format!(
                "dataset holds {} participants, {} configured",
                dataset.participant_count(),
                self.participant_count
            )));
        }
        let abilities = ability.for_participants(self.participant_count)?;

        let mut rows = Vec::with_capacity(self.participant_count);
        for (id, &ability) in abilities.iter().enumerate() {
            let answ = dataset.answers(id);
            let temp = dataset.times(id);
            rows.push(ParticipantRow {
                id,
                sum_answ: sum(answ),
                mean_answ: mean(answ),
                sd_answ: sample_sd(answ),
                sum_temp: sum(temp),
                mean_temp: mean(temp),
                sd_temp: sample_sd(temp),
                ability,
            });
        }
        tracing::debug!(participants = rows.len(), "participant summary built");
        Ok(ParticipantSummary { rows })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/core/aggregate.rs"]
mod tests;
