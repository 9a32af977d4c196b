use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::position::PositionGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKind {
    Physical,
    Technical,
    Merged,
}

pub const ALL_DATASET_KINDS: [DatasetKind; 3] = [
    DatasetKind::Physical,
    DatasetKind::Technical,
    DatasetKind::Merged,
];

pub fn dataset_label(kind: DatasetKind) -> &'static str {
    match kind {
        DatasetKind::Physical => "Physical",
        DatasetKind::Technical => "Technical",
        DatasetKind::Merged => "Merged",
    }
}

/// One player-season-competition row of a loaded dataset.
///
/// Metric cells that were empty or unparseable are simply absent from
/// `metrics` — "missing" is the absence of the key, never a stored NaN.
/// Records are immutable after load; filtering works on borrowed subsets.
#[derive(Debug, Clone, Default)]
pub struct PlayerRecord {
    pub player_name: String,
    pub short_name: String,
    pub team: String,
    pub season: String,
    pub competition: String,
    pub position: Option<PositionGroup>,
    pub position_label: String,
    pub birthdate: Option<String>,
    pub age: Option<u32>,
    pub minutes: Option<f64>,
    pub metrics: HashMap<String, f64>,
}

impl PlayerRecord {
    pub fn metric(&self, column: &str) -> Option<f64> {
        self.metrics.get(column).copied()
    }

    /// Display name, falling back to the full name when no short form exists.
    pub fn display_name(&self) -> &str {
        if self.short_name.is_empty() {
            &self.player_name
        } else {
            &self.short_name
        }
    }

    /// Row identity: a player appears at most once per team/season/competition.
    pub fn same_row(&self, other: &PlayerRecord) -> bool {
        self.player_name == other.player_name
            && self.team == other.team
            && self.season == other.season
            && self.competition == other.competition
    }
}

/// A loaded table: the metric columns actually present (post header cleanup)
/// plus one `PlayerRecord` per row.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub kind: DatasetKind,
    pub columns: Vec<String>,
    pub rows: Vec<PlayerRecord>,
}

impl Dataset {
    pub fn empty(kind: DatasetKind) -> Self {
        Self {
            kind,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn seasons(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for row in &self.rows {
            if !row.season.is_empty() && !out.contains(&row.season) {
                out.push(row.season.clone());
            }
        }
        out.sort();
        out
    }

    pub fn competitions(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for row in &self.rows {
            if !row.competition.is_empty() && !out.contains(&row.competition) {
                out.push(row.competition.clone());
            }
        }
        out.sort();
        out
    }
}
