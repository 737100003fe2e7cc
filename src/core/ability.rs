use crate::core::error::{DashResult, DashboardError};
use serde::Deserialize;
use std::path::Path;

/// Per-participant IRT ability estimates, aligned with participant ids.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AbilityParameters {
    pub ability: Vec<f64>,
}

impl AbilityParameters {
    pub fn load(path: &Path) -> DashResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::data_load(path, e.to_string()))?;
        Self::parse(&content).map_err(|reason| DashboardError::data_load(path, reason))
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("invalid ability file: {e}"))
    }

    /// The first `participant_count` abilities.
    pub fn for_participants(&self, participant_count: usize) -> DashResult<&[f64]> {
        if self.ability.len() < participant_count {
            return Err(DashboardError::Configuration(format!(
                "ability parameters cover {} participants, {} required",
                self.ability.len(),
                participant_count
            )));
        }
        Ok(&self.ability[..participant_count])
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/core/ability.rs"]
mod tests;
