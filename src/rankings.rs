use crate::cohort::{CohortFilter, select_cohort};
use crate::error::ScoreError;
use crate::metrics::MetricCatalog;
use crate::percentile::directional_percentile;
use crate::position::PositionGroup;
use crate::record::{Dataset, PlayerRecord};
use crate::score_index::composite_indexes;
use crate::thresholds::{IndexKind, ScoringConfig, index_kinds_for};

/// One radar spoke: the raw value and the direction-adjusted percentile of
/// the focal player within the peer cohort. Metrics that do not resolve (or
/// focal values that are missing) render as NA axes instead of failing the
/// whole radar.
#[derive(Debug, Clone)]
pub struct RadarAxis {
    pub metric: String,
    pub value: Option<f64>,
    pub percentile: Option<f64>,
}

pub fn build_radar(
    catalog: &MetricCatalog,
    columns: &[String],
    cohort: &[&PlayerRecord],
    focal: &PlayerRecord,
    metrics: &[String],
) -> Vec<RadarAxis> {
    metrics
        .iter()
        .map(|metric| {
            let Ok(column) = catalog.resolve(columns, metric) else {
                return RadarAxis {
                    metric: metric.clone(),
                    value: None,
                    percentile: None,
                };
            };
            let value = focal.metric(column);
            let percentile = value.map(|v| {
                let values: Vec<f64> =
                    cohort.iter().filter_map(|rec| rec.metric(column)).collect();
                directional_percentile(catalog.direction(metric), &values, v)
            });
            RadarAxis {
                metric: metric.clone(),
                value,
                percentile,
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub display_name: String,
    pub team: String,
    pub competition: String,
    pub season: String,
    pub age: Option<u32>,
    pub minutes: Option<f64>,
    /// Composite indexes in `index_kinds_for(position)` order.
    pub indexes: Vec<(IndexKind, u32)>,
    pub rank: usize,
    pub of: usize,
}

impl LeaderboardEntry {
    pub fn index(&self, kind: IndexKind) -> Option<u32> {
        self.indexes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| *v)
    }
}

/// Rank a position's peer cohort by one composite index.
///
/// The sort is stable and descending, so ties keep cohort order. An empty
/// cohort is an empty leaderboard; a missing scale or group for the position
/// propagates so the UI can name the offending position instead of
/// substituting a neighbour's scale.
pub fn compute_leaderboard(
    cfg: &ScoringConfig,
    catalog: &MetricCatalog,
    dataset: &Dataset,
    position: PositionGroup,
    season: &str,
    competitions: &[String],
    min_minutes: Option<f64>,
    sort_index: IndexKind,
) -> Result<Vec<LeaderboardEntry>, ScoreError> {
    let filter = CohortFilter {
        position,
        season,
        competitions,
        min_minutes,
    };
    let cohort = select_cohort(&dataset.rows, &filter);
    if cohort.is_empty() {
        return Ok(Vec::new());
    }

    let kinds = index_kinds_for(position);
    let mut per_kind = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let breakdowns =
            composite_indexes(cfg, catalog, &dataset.columns, &cohort, *kind, position);
        let mut values = Vec::with_capacity(cohort.len());
        for b in breakdowns {
            values.push(b?.index);
        }
        per_kind.push((*kind, values));
    }

    let n = cohort.len();
    let mut entries: Vec<LeaderboardEntry> = cohort
        .iter()
        .enumerate()
        .map(|(i, rec)| LeaderboardEntry {
            player_name: rec.player_name.clone(),
            display_name: rec.display_name().to_string(),
            team: rec.team.clone(),
            competition: rec.competition.clone(),
            season: rec.season.clone(),
            age: rec.age,
            minutes: rec.minutes,
            indexes: per_kind.iter().map(|(kind, vals)| (*kind, vals[i])).collect(),
            rank: 0,
            of: n,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.index(sort_index)
            .unwrap_or(0)
            .cmp(&a.index(sort_index).unwrap_or(0))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    Ok(entries)
}
