use std::collections::HashSet;

use rand::Rng;
use rand::seq::index::sample;

use crate::error::ScoreError;
use crate::metrics::MetricCatalog;
use crate::record::PlayerRecord;

/// Point labels get unreadable past this; larger sets are sampled.
pub const MAX_LABELS: usize = 300;

#[derive(Debug, Clone)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone)]
pub struct ScatterData {
    pub x_column: String,
    pub y_column: String,
    pub points: Vec<ScatterPoint>,
    /// Indices into `points` chosen to carry a visible text label.
    pub labeled: Vec<usize>,
    pub mean_x: f64,
    pub mean_y: f64,
}

/// Build the XY view for two metrics. Rows missing either value are left
/// out; the mean reference lines are computed over the rows that remain.
/// Both metric names must resolve — a scatter axis is not optional.
pub fn build_scatter(
    catalog: &MetricCatalog,
    columns: &[String],
    records: &[&PlayerRecord],
    x_metric: &str,
    y_metric: &str,
    highlights: &HashSet<String>,
    rng: &mut impl Rng,
) -> Result<ScatterData, ScoreError> {
    let x_column = catalog.resolve(columns, x_metric)?.to_string();
    let y_column = catalog.resolve(columns, y_metric)?.to_string();

    let mut points = Vec::new();
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for rec in records {
        let (Some(x), Some(y)) = (rec.metric(&x_column), rec.metric(&y_column)) else {
            continue;
        };
        sum_x += x;
        sum_y += y;
        points.push(ScatterPoint {
            x,
            y,
            label: rec.display_name().to_string(),
            highlighted: highlights.contains(rec.display_name())
                || highlights.contains(&rec.player_name),
        });
    }

    let n = points.len();
    let (mean_x, mean_y) = if n > 0 {
        (sum_x / n as f64, sum_y / n as f64)
    } else {
        (0.0, 0.0)
    };

    let labeled = if n > MAX_LABELS {
        let mut picked = sample(rng, n, MAX_LABELS).into_vec();
        picked.sort_unstable();
        picked
    } else {
        (0..n).collect()
    };

    Ok(ScatterData {
        x_column,
        y_column,
        points,
        labeled,
        mean_x,
        mean_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rec(name: &str, x: Option<f64>, y: Option<f64>) -> PlayerRecord {
        let mut metrics = std::collections::HashMap::new();
        if let Some(x) = x {
            metrics.insert("X".to_string(), x);
        }
        if let Some(y) = y {
            metrics.insert("Y".to_string(), y);
        }
        PlayerRecord {
            player_name: name.to_string(),
            metrics,
            ..Default::default()
        }
    }

    #[test]
    fn rows_missing_either_axis_are_excluded_from_points_and_means() {
        let catalog = MetricCatalog::builtin();
        let columns = vec!["X".to_string(), "Y".to_string()];
        let a = rec("A", Some(1.0), Some(10.0));
        let b = rec("B", Some(3.0), Some(30.0));
        let c = rec("C", Some(99.0), None);
        let records = vec![&a, &b, &c];

        let mut rng = StdRng::seed_from_u64(7);
        let data = build_scatter(
            &catalog,
            &columns,
            &records,
            "X",
            "Y",
            &HashSet::new(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(data.points.len(), 2);
        assert!((data.mean_x - 2.0).abs() < 1e-9);
        assert!((data.mean_y - 20.0).abs() < 1e-9);
        assert_eq!(data.labeled.len(), 2);
    }

    #[test]
    fn label_subset_respects_cap() {
        let catalog = MetricCatalog::builtin();
        let columns = vec!["X".to_string(), "Y".to_string()];
        let owned: Vec<PlayerRecord> = (0..MAX_LABELS + 50)
            .map(|i| rec(&format!("P{i}"), Some(i as f64), Some(i as f64)))
            .collect();
        let records: Vec<&PlayerRecord> = owned.iter().collect();

        let mut rng = StdRng::seed_from_u64(42);
        let data = build_scatter(
            &catalog,
            &columns,
            &records,
            "X",
            "Y",
            &HashSet::new(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(data.points.len(), MAX_LABELS + 50);
        assert_eq!(data.labeled.len(), MAX_LABELS);
    }

    #[test]
    fn unknown_axis_metric_is_an_error() {
        let catalog = MetricCatalog::builtin();
        let columns = vec!["X".to_string()];
        let a = rec("A", Some(1.0), Some(2.0));
        let records = vec![&a];
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_scatter(
            &catalog,
            &columns,
            &records,
            "X",
            "Missing Metric",
            &HashSet::new(),
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, ScoreError::MetricNotFound(_)));
    }
}
