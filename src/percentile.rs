use crate::metrics::Direction;
use crate::record::PlayerRecord;

/// Mid-rank percentile of `focal` within `cohort`, in [0, 100].
///
/// Ties get half credit: `(lower + 0.5 * equal) / n * 100`. This keeps the
/// cohort minimum just above 0 and the maximum just below 100, and makes the
/// result independent of how many duplicates of the focal value exist
/// (including the focal row itself when it is drawn from the cohort).
/// An empty cohort is defined as 0.0.
pub fn percentile_rank(cohort: &[f64], focal: f64) -> f64 {
    let mut n = 0usize;
    let mut lower = 0usize;
    let mut equal = 0usize;
    for &v in cohort {
        if !v.is_finite() {
            continue;
        }
        n += 1;
        if v < focal {
            lower += 1;
        } else if v == focal {
            equal += 1;
        }
    }
    if n == 0 {
        return 0.0;
    }
    (lower as f64 + 0.5 * equal as f64) / n as f64 * 100.0
}

/// Percentile adjusted for the metric's direction: for lower-is-better
/// metrics a small raw value should land near the top of the radar axis.
pub fn directional_percentile(direction: Direction, cohort: &[f64], focal: f64) -> f64 {
    let p = percentile_rank(cohort, focal);
    match direction {
        Direction::HigherBetter => p,
        Direction::LowerBetter => 100.0 - p,
    }
}

/// Ordinal rank of `focal` within `cohort` on `column`: `(rank, cohort_size)`
/// with rank 1 the best. Rows without a value on the column are excluded.
///
/// The sort is stable and descending, so tied values keep their original row
/// order — an accepted arbitrary tie-break, not a meaningful ordering.
/// Returns `None` when the cohort is empty or the focal row has no value
/// (rank displays as "—").
pub fn ordinal_rank(
    cohort: &[&PlayerRecord],
    column: &str,
    focal: &PlayerRecord,
) -> Option<(usize, usize)> {
    let mut ranked: Vec<(usize, f64)> = cohort
        .iter()
        .enumerate()
        .filter_map(|(idx, rec)| rec.metric(column).map(|v| (idx, v)))
        .collect();
    if ranked.is_empty() {
        return None;
    }
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let n = ranked.len();
    ranked
        .iter()
        .position(|(idx, _)| cohort[*idx].same_row(focal))
        .map(|pos| (pos + 1, n))
}
