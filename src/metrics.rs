use std::collections::{HashMap, HashSet};

use crate::error::ScoreError;

/// Whether a bigger raw value is a good thing. Declared per metric in the
/// catalog so percentile inversion cannot be forgotten at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherBetter,
    LowerBetter,
}

/// Known spelling drift across dataset exports. Candidates are in priority
/// order; the display name itself is always the first candidate.
const ALIASES: &[(&str, &[&str])] = &[
    (
        "OP xGAssisted",
        &[
            "OP xGAssisted",
            "Op xA P90",
            "OP xA P90",
            "OP xA",
            "xA OP P90",
            "xA (OP) P90",
            "Op Xa P90",
        ],
    ),
    ("OBV P90", &["OBV P90", "OBV", "On-Ball Value P90"]),
    ("OBV Pass P90", &["OBV Pass P90", "Pass OBV P90", "OBV Pass"]),
    (
        "OBV Dribble & Carry P90",
        &["OBV Dribble & Carry P90", "OBV D&C P90", "Dribble & Carry OBV P90"],
    ),
    ("NP Goals P90", &["NP Goals P90", "Np Goals P90", "Non-Penalty Goals P90"]),
    ("NP xG P90", &["NP xG P90", "NPxG P90", "Np Xg P90", "xG P90"]),
    (
        "Deep Progressions P90",
        &["Deep Progressions P90", "Deep Progressions", "Deep Progression P90"],
    ),
    (
        "PAdj Tackles & Interceptions P90",
        &[
            "PAdj Tackles & Interceptions P90",
            "PAdj Tackles And Interceptions P90",
            "Padj Tackles & Interceptions",
        ],
    ),
    ("Turnovers P90", &["Turnovers P90", "Turnovers"]),
    ("Dispossessed P90", &["Dispossessed P90", "Dispossessions P90"]),
    (
        "Pass Into Danger %",
        &["Pass Into Danger %", "Pass Into Danger%", "Passes Into Danger %"],
    ),
    ("PSV-99", &["PSV-99", "PSV99", "Psv-99"]),
    // Physical exports flipped between snake_case API keys and display names.
    (
        "total_distance_full_all_p90",
        &["total_distance_full_all_p90", "Distance P90", "Total Distance P90"],
    ),
    (
        "running_distance_full_all_p90",
        &["running_distance_full_all_p90", "Running Distance P90"],
    ),
    (
        "hsr_distance_full_all_p90",
        &["hsr_distance_full_all_p90", "HSR Distance P90"],
    ),
    (
        "sprint_count_full_all_p90",
        &["sprint_count_full_all_p90", "Sprint Count P90"],
    ),
    (
        "high_acceleration_count_full_all_p90",
        &["high_acceleration_count_full_all_p90", "High Acceleration Count P90"],
    ),
    (
        "psv99_top5_average",
        &["psv99_top5_average", "TOP 5 PSV-99", "PSV-99 Top 5"],
    ),
    ("Save %", &["Save %", "Save%", "Save Percentage"]),
    ("GSAA P90", &["GSAA P90", "Gsaa P90", "Goals Saved Above Average P90"]),
];

/// Metrics where a smaller value is the better one.
const LOWER_IS_BETTER: &[&str] = &["Turnovers P90", "Dispossessed P90", "Pass Into Danger %"];

/// The metric name catalog: alias resolution plus per-metric direction.
/// Built once at startup and passed into the engine explicitly.
#[derive(Debug, Clone)]
pub struct MetricCatalog {
    aliases: HashMap<String, Vec<String>>,
    lower_is_better: HashSet<String>,
}

impl MetricCatalog {
    pub fn builtin() -> Self {
        let aliases = ALIASES
            .iter()
            .map(|(name, cands)| {
                (
                    name.to_string(),
                    cands.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect();
        let lower_is_better = LOWER_IS_BETTER.iter().map(|m| m.to_string()).collect();
        Self {
            aliases,
            lower_is_better,
        }
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
            lower_is_better: HashSet::new(),
        }
    }

    pub fn direction(&self, metric: &str) -> Direction {
        if self.lower_is_better.contains(metric) {
            Direction::LowerBetter
        } else {
            Direction::HigherBetter
        }
    }

    /// Map a requested metric name to the column actually present.
    ///
    /// Order: exact match, alias candidates verbatim, alias candidates
    /// case-insensitively, then a case-insensitive scan for the requested
    /// name itself. First hit wins; no hit is `MetricNotFound`, which callers
    /// must keep distinct from a present column holding a missing value.
    pub fn resolve<'a>(
        &self,
        columns: &'a [String],
        requested: &str,
    ) -> Result<&'a str, ScoreError> {
        if let Some(col) = columns.iter().find(|c| c.as_str() == requested) {
            return Ok(col);
        }

        let fallback = [requested.to_string()];
        let candidates: &[String] = match self.aliases.get(requested) {
            Some(cands) => cands,
            None => &fallback,
        };

        for cand in candidates {
            if let Some(col) = columns.iter().find(|c| c.as_str() == cand.as_str()) {
                return Ok(col);
            }
        }
        for cand in candidates {
            if let Some(col) = columns.iter().find(|c| c.eq_ignore_ascii_case(cand)) {
                return Ok(col);
            }
        }
        if let Some(col) = columns.iter().find(|c| c.eq_ignore_ascii_case(requested)) {
            return Ok(col);
        }

        Err(ScoreError::MetricNotFound(requested.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_beats_aliases() {
        let catalog = MetricCatalog::builtin();
        let columns = cols(&["Op xA P90", "OP xGAssisted"]);
        assert_eq!(
            catalog.resolve(&columns, "OP xGAssisted").unwrap(),
            "OP xGAssisted"
        );
    }

    #[test]
    fn alias_chain_finds_renamed_column() {
        let catalog = MetricCatalog::builtin();
        let columns = cols(&["Minutes", "Op xA P90", "Team"]);
        assert_eq!(
            catalog.resolve(&columns, "OP xGAssisted").unwrap(),
            "Op xA P90"
        );
    }

    #[test]
    fn case_insensitive_fallback_for_unknown_name() {
        let catalog = MetricCatalog::builtin();
        let columns = cols(&["hsr distance p90"]);
        assert_eq!(
            catalog.resolve(&columns, "HSR Distance P90").unwrap(),
            "hsr distance p90"
        );
    }

    #[test]
    fn missing_metric_is_an_error() {
        let catalog = MetricCatalog::builtin();
        let columns = cols(&["Minutes"]);
        assert_eq!(
            catalog.resolve(&columns, "OP xGAssisted"),
            Err(ScoreError::MetricNotFound("OP xGAssisted".to_string()))
        );
    }
}
