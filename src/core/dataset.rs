use crate::core::error::{DashResult, DashboardError};
use crate::core::io::read_input;
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;

pub const MS_PER_SECOND: f64 = 1000.0;

const COL_WORDS: &str = "words";
const COL_DIFFICULTY: &str = "difficulty";
const COL_ANSW_MEAN: &str = "answ_mean";
const COL_TEMP_MEAN: &str = "temp_mean";

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub words: String,
    pub difficulty: f64,
    pub answ_mean: f64,
    /// Mean response time across participants, milliseconds.
    pub temp_mean_ms: f64,
}

impl Item {
    pub fn time_spent_seconds(&self) -> f64 {
        self.temp_mean_ms / MS_PER_SECOND
    }
}

/// Record positions of one participant's answer and time columns.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParticipantColumns {
    pub id: usize,
    pub answ: usize,
    pub temp: usize,
}

#[derive(Clone, Debug)]
pub struct ItemColumns {
    pub words: usize,
    pub difficulty: usize,
    pub answ_mean: usize,
    pub temp_mean: usize,
}

/// Column layout resolved once from the header row.
#[derive(Clone, Debug)]
pub struct DatasetSchema {
    pub item: ItemColumns,
    pub participants: Vec<ParticipantColumns>,
}

impl DatasetSchema {
    pub fn resolve(header: &StringRecord, participant_count: usize) -> Result<Self, String> {
        let find = |name: &str| -> Result<usize, String> {
            header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| format!("missing column `{}`", name))
        };
        let item = ItemColumns {
            words: find(COL_WORDS)?,
            difficulty: find(COL_DIFFICULTY)?,
            answ_mean: find(COL_ANSW_MEAN)?,
            temp_mean: find(COL_TEMP_MEAN)?,
        };
        let mut participants = Vec::with_capacity(participant_count);
        for id in 0..participant_count {
            participants.push(ParticipantColumns {
                id,
                answ: find(&format!("answ_{}", id))?,
                temp: find(&format!("temp_{}", id))?,
            });
        }
        Ok(Self { item, participants })
    }
}

/// Item table plus per-participant response columns. Never mutated after load.
#[derive(Clone, Debug)]
pub struct RawDataset {
    items: Vec<Item>,
    // [participant][item]
    answ: Vec<Vec<f64>>,
    temp: Vec<Vec<f64>>,
}

impl RawDataset {
    pub fn from_columns(
        items: Vec<Item>,
        answ: Vec<Vec<f64>>,
        temp: Vec<Vec<f64>>,
    ) -> Result<Self, String> {
        if answ.len() != temp.len() {
            return Err(format!(
                "answ/temp participant counts differ ({} vs {})",
                answ.len(),
                temp.len()
            ));
        }
        for (id, (a, t)) in answ.iter().zip(temp.iter()).enumerate() {
            if a.len() != items.len() || t.len() != items.len() {
                return Err(format!(
                    "participant {} has {}/{} values for {} items",
                    id,
                    a.len(),
                    t.len(),
                    items.len()
                ));
            }
        }
        Ok(Self { items, answ, temp })
    }

    pub fn load(path: &Path, participant_count: usize) -> DashResult<Self> {
        let input = read_input(path)?;
        tracing::debug!(
            path = %path.display(),
            kind = input.kind_label(),
            bytes = input.as_slice().len(),
            "dataset input opened"
        );
        Self::parse(input.as_slice(), participant_count)
            .map_err(|reason| DashboardError::data_load(path, reason))
    }

    pub fn parse(bytes: &[u8], participant_count: usize) -> Result<Self, String> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(bytes);
        let header = reader
            .headers()
            .map_err(|e| format!("invalid header: {e}"))?
            .clone();
        let schema = DatasetSchema::resolve(&header, participant_count)?;

        let mut items = Vec::new();
        let mut answ = vec![Vec::new(); participant_count];
        let mut temp = vec![Vec::new(); participant_count];
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| format!("row {}: {e}", row + 1))?;
            let cell = |idx: usize| record.get(idx).unwrap_or("");
            let item_value = |idx: usize, name: &str| -> Result<f64, String> {
                let v = parse_cell(cell(idx))
                    .map_err(|e| format!("row {}, column `{}`: {}", row + 1, name, e))?;
                if v.is_finite() {
                    Ok(v)
                } else {
                    Err(format!("row {}, column `{}`: value is missing", row + 1, name))
                }
            };
            items.push(Item {
                words: cell(schema.item.words).trim().to_string(),
                difficulty: item_value(schema.item.difficulty, COL_DIFFICULTY)?,
                answ_mean: item_value(schema.item.answ_mean, COL_ANSW_MEAN)?,
                temp_mean_ms: item_value(schema.item.temp_mean, COL_TEMP_MEAN)?,
            });
            for cols in &schema.participants {
                let a = parse_cell(cell(cols.answ))
                    .map_err(|e| format!("row {}, column `answ_{}`: {}", row + 1, cols.id, e))?;
                let t = parse_cell(cell(cols.temp))
                    .map_err(|e| format!("row {}, column `temp_{}`: {}", row + 1, cols.id, e))?;
                answ[cols.id].push(a);
                temp[cols.id].push(t);
            }
        }
        if items.is_empty() {
            return Err("no item rows".to_string());
        }
        Self::from_columns(items, answ, temp)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    pub fn participant_count(&self) -> usize {
        self.answ.len()
    }

    /// Answer column of one participant; `NaN` marks a missing value.
    pub fn answers(&self, id: usize) -> &[f64] {
        &self.answ[id]
    }

    pub fn times(&self, id: usize) -> &[f64] {
        &self.temp[id]
    }

    /// Per-item mean time in seconds, derived fresh on every call.
    pub fn time_spent_seconds(&self) -> Vec<f64> {
        self.items.iter().map(Item::time_spent_seconds).collect()
    }

    pub fn difficulties(&self) -> Vec<f64> {
        self.items.iter().map(|i| i.difficulty).collect()
    }
}

/// Empty cells and `NaN` literals are missing values.
fn parse_cell(raw: &str) -> Result<f64, String> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .map_err(|_| format!("not a number: {:?}", s))
}

#[cfg(test)]
#[path = "../../tests/src_inline/core/dataset.rs"]
mod tests;
