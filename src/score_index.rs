use rayon::prelude::*;

use crate::error::ScoreError;
use crate::metrics::MetricCatalog;
use crate::position::PositionGroup;
use crate::record::PlayerRecord;
use crate::thresholds::{IndexKind, ScoringConfig};

/// One metric's contribution to a composite index. `column`/`value` stay
/// `None` when the metric did not resolve or the cell is missing — the UI
/// shows NA for those, they still score 0 of their max.
#[derive(Debug, Clone)]
pub struct MetricScore {
    pub metric: String,
    pub column: Option<String>,
    pub value: Option<f64>,
    pub points: u32,
    pub max_points: u32,
}

#[derive(Debug, Clone)]
pub struct IndexBreakdown {
    pub index_kind: IndexKind,
    pub position: PositionGroup,
    pub total: u32,
    pub max: u32,
    pub index: u32,
    pub per_metric: Vec<MetricScore>,
}

/// Score one record's metric group and fold it into a 0–100 composite index.
///
/// A metric whose column does not resolve in this dataset contributes 0
/// points but keeps its max in the denominator, so the index means the same
/// thing for every row of the dataset. A missing scale or group is a
/// configuration error and propagates.
pub fn composite_index(
    cfg: &ScoringConfig,
    catalog: &MetricCatalog,
    columns: &[String],
    record: &PlayerRecord,
    index_kind: IndexKind,
    position: PositionGroup,
) -> Result<IndexBreakdown, ScoreError> {
    let group = cfg.group(index_kind, position)?;

    let mut total = 0u32;
    let mut max = 0u32;
    let mut per_metric = Vec::with_capacity(group.len());

    for metric in group {
        let column = catalog.resolve(columns, metric).ok().map(str::to_string);
        let value = column.as_deref().and_then(|c| record.metric(c));
        let points = cfg.score(metric, position, value)?;
        let max_points = cfg.max_score(metric, position)?;
        total += points;
        max += max_points;
        per_metric.push(MetricScore {
            metric: metric.clone(),
            column,
            value,
            points,
            max_points,
        });
    }

    // An empty group would divide by zero; defined as index 0.
    let index = if max > 0 {
        (100.0 * f64::from(total) / f64::from(max)).round() as u32
    } else {
        0
    };

    Ok(IndexBreakdown {
        index_kind,
        position,
        total,
        max,
        index,
        per_metric,
    })
}

/// Batch variant over a whole cohort, in cohort order. Rows that hit a
/// configuration error come back as that error so callers can surface the
/// offending position instead of silently scoring it 0.
pub fn composite_indexes<'a>(
    cfg: &ScoringConfig,
    catalog: &MetricCatalog,
    columns: &[String],
    records: &[&'a PlayerRecord],
    index_kind: IndexKind,
    position: PositionGroup,
) -> Vec<Result<IndexBreakdown, ScoreError>> {
    records
        .par_iter()
        .map(|record| composite_index(cfg, catalog, columns, record, index_kind, position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thresholds::bands5;

    fn synthetic_cfg() -> ScoringConfig {
        let mut cfg = ScoringConfig::new();
        cfg.set_table("a", PositionGroup::Midfield, bands5([40.0, 30.0, 20.0, 10.0]));
        cfg.set_table("b", PositionGroup::Midfield, bands5([4.0, 3.0, 2.0, 1.0]));
        cfg.set_group(
            crate::thresholds::IndexKind::Technical,
            PositionGroup::Midfield,
            &["a", "b"],
        );
        cfg
    }

    fn record(metrics: &[(&str, f64)]) -> PlayerRecord {
        PlayerRecord {
            player_name: "Test".to_string(),
            metrics: metrics.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn index_is_ratio_of_total_to_max() {
        let cfg = synthetic_cfg();
        let catalog = MetricCatalog::empty();
        let columns = vec!["a".to_string(), "b".to_string()];
        let rec = record(&[("a", 45.0), ("b", 2.5)]);

        let out = composite_index(
            &cfg,
            &catalog,
            &columns,
            &rec,
            IndexKind::Technical,
            PositionGroup::Midfield,
        )
        .unwrap();
        assert_eq!(out.total, 15); // 10 + 5
        assert_eq!(out.max, 20);
        assert_eq!(out.index, 75);
    }

    #[test]
    fn unresolved_metric_scores_zero_but_keeps_its_max() {
        let cfg = synthetic_cfg();
        let catalog = MetricCatalog::empty();
        let columns = vec!["a".to_string()]; // "b" absent from the dataset
        let rec = record(&[("a", 45.0)]);

        let out = composite_index(
            &cfg,
            &catalog,
            &columns,
            &rec,
            IndexKind::Technical,
            PositionGroup::Midfield,
        )
        .unwrap();
        assert_eq!(out.total, 10);
        assert_eq!(out.max, 20);
        assert_eq!(out.index, 50);
        assert!(out.per_metric[1].column.is_none());
    }

    #[test]
    fn missing_group_is_an_error() {
        let cfg = synthetic_cfg();
        let catalog = MetricCatalog::empty();
        let err = composite_index(
            &cfg,
            &catalog,
            &[],
            &record(&[]),
            IndexKind::Defensive,
            PositionGroup::Midfield,
        )
        .unwrap_err();
        assert!(matches!(err, ScoreError::GroupMissing { .. }));
    }

    #[test]
    fn empty_group_yields_index_zero() {
        let mut cfg = ScoringConfig::new();
        cfg.set_group(IndexKind::Technical, PositionGroup::Midfield, &[]);
        let out = composite_index(
            &cfg,
            &MetricCatalog::empty(),
            &[],
            &record(&[]),
            IndexKind::Technical,
            PositionGroup::Midfield,
        )
        .unwrap();
        assert_eq!(out.max, 0);
        assert_eq!(out.index, 0);
    }
}
