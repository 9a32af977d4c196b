use thiserror::Error;

use crate::position::PositionGroup;
use crate::thresholds::IndexKind;

/// Errors from the scoring/ranking core. `MetricNotFound` is recoverable at
/// call sites where a metric is optional (display NA, score 0); the
/// configuration variants are not — scoring a position without its scale
/// would silently misrepresent the player, so they surface to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("metric `{0}` has no matching column in this dataset")]
    MetricNotFound(String),
    #[error("no threshold scale for `{metric}` at position {}", position.physical_label())]
    ScaleMissing {
        metric: String,
        position: PositionGroup,
    },
    #[error("no {index:?} metric group defined for position {}", position.physical_label())]
    GroupMissing {
        index: IndexKind,
        position: PositionGroup,
    },
}
