pub mod cohort;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod metrics;
pub mod percentile;
pub mod persist;
pub mod position;
pub mod rankings;
pub mod record;
pub mod scatter;
pub mod score_index;
pub mod state;
pub mod thresholds;
