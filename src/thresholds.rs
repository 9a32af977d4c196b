use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::ScoreError;
use crate::position::PositionGroup;

/// One scoring bracket: half-open `[min, max)`, open-ended when a bound is
/// `None`. A value equal to `max` falls into the next (lower) bracket; a
/// value equal to `min` stays in this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub points: u32,
}

impl Band {
    fn contains(&self, value: f64) -> bool {
        if let Some(min) = self.min
            && value < min
        {
            return false;
        }
        if let Some(max) = self.max
            && value >= max
        {
            return false;
        }
        true
    }
}

/// Ordered bands for one (metric, position) pair, highest score first, so the
/// scan finds the highest bracket the value clears. Bands partition the real
/// line: every finite value matches exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable {
    bands: Vec<Band>,
}

impl ThresholdTable {
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    pub fn score(&self, value: f64) -> u32 {
        self.bands
            .iter()
            .find(|band| band.contains(value))
            .map(|band| band.points)
            .unwrap_or(0)
    }

    pub fn max_points(&self) -> u32 {
        self.bands.iter().map(|b| b.points).max().unwrap_or(0)
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }
}

/// Five-band table from four descending cut points, scored 10/7/5/3/0.
/// Every built-in scale follows this shape.
pub fn bands5(cuts: [f64; 4]) -> ThresholdTable {
    let [c1, c2, c3, c4] = cuts;
    debug_assert!(c1 > c2 && c2 > c3 && c3 > c4, "cuts must be descending");
    ThresholdTable::new(vec![
        Band { min: Some(c1), max: None, points: 10 },
        Band { min: Some(c2), max: Some(c1), points: 7 },
        Band { min: Some(c3), max: Some(c2), points: 5 },
        Band { min: Some(c4), max: Some(c3), points: 3 },
        Band { min: None, max: Some(c4), points: 0 },
    ])
}

/// The composite indexes a record can carry. Goalkeepers get the save and
/// distribution indexes instead of the outfield technical/defensive pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Physical,
    Technical,
    Defensive,
    GkSave,
    GkUsage,
}

pub fn index_label(kind: IndexKind) -> &'static str {
    match kind {
        IndexKind::Physical => "xPhysical",
        IndexKind::Technical => "xTECH",
        IndexKind::Defensive => "xDEF",
        IndexKind::GkSave => "xSAVE",
        IndexKind::GkUsage => "xUSAGE",
    }
}

pub fn index_kinds_for(position: PositionGroup) -> &'static [IndexKind] {
    match position {
        PositionGroup::Goalkeeper => {
            &[IndexKind::Physical, IndexKind::GkSave, IndexKind::GkUsage]
        }
        _ => &[IndexKind::Physical, IndexKind::Technical, IndexKind::Defensive],
    }
}

/// Immutable scoring configuration: threshold scales keyed by
/// (metric, position) and metric groups keyed by (index, position).
/// Constructed once at startup; the engine takes it by reference so tests can
/// substitute synthetic scales.
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    tables: HashMap<(String, PositionGroup), ThresholdTable>,
    groups: HashMap<(IndexKind, PositionGroup), Vec<String>>,
}

impl ScoringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_table(
        &mut self,
        metric: &str,
        position: PositionGroup,
        table: ThresholdTable,
    ) -> &mut Self {
        self.tables.insert((metric.to_string(), position), table);
        self
    }

    pub fn set_group(
        &mut self,
        index: IndexKind,
        position: PositionGroup,
        metrics: &[&str],
    ) -> &mut Self {
        self.groups.insert(
            (index, position),
            metrics.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    pub fn table(
        &self,
        metric: &str,
        position: PositionGroup,
    ) -> Result<&ThresholdTable, ScoreError> {
        self.tables
            .get(&(metric.to_string(), position))
            .ok_or_else(|| ScoreError::ScaleMissing {
                metric: metric.to_string(),
                position,
            })
    }

    /// Point score for one raw value. A missing (or non-finite) value scores
    /// 0; a missing scale is a configuration error and must not be scored.
    pub fn score(
        &self,
        metric: &str,
        position: PositionGroup,
        value: Option<f64>,
    ) -> Result<u32, ScoreError> {
        let table = self.table(metric, position)?;
        match value {
            Some(v) if v.is_finite() => Ok(table.score(v)),
            _ => Ok(0),
        }
    }

    pub fn max_score(&self, metric: &str, position: PositionGroup) -> Result<u32, ScoreError> {
        Ok(self.table(metric, position)?.max_points())
    }

    pub fn group(
        &self,
        index: IndexKind,
        position: PositionGroup,
    ) -> Result<&[String], ScoreError> {
        self.groups
            .get(&(index, position))
            .map(|v| v.as_slice())
            .ok_or(ScoreError::GroupMissing { index, position })
    }

    /// The shared built-in configuration.
    pub fn shared() -> &'static ScoringConfig {
        static BUILTIN: Lazy<ScoringConfig> = Lazy::new(ScoringConfig::builtin);
        &BUILTIN
    }

    pub fn builtin() -> Self {
        let mut cfg = Self::new();
        physical_scales(&mut cfg);
        technical_scales(&mut cfg);
        defensive_scales(&mut cfg);
        goalkeeper_scales(&mut cfg);
        metric_groups(&mut cfg);
        cfg
    }
}

pub const TOTAL_DISTANCE: &str = "total_distance_full_all_p90";
pub const RUNNING_DISTANCE: &str = "running_distance_full_all_p90";
pub const HSR_DISTANCE: &str = "hsr_distance_full_all_p90";
pub const SPRINT_COUNT: &str = "sprint_count_full_all_p90";
pub const HIGH_ACCEL_COUNT: &str = "high_acceleration_count_full_all_p90";
pub const PSV99: &str = "psv99_top5_average";

pub const PHYSICAL_GROUP: [&str; 6] = [
    TOTAL_DISTANCE,
    RUNNING_DISTANCE,
    HSR_DISTANCE,
    SPRINT_COUNT,
    HIGH_ACCEL_COUNT,
    PSV99,
];

fn physical_scales(cfg: &mut ScoringConfig) {
    use PositionGroup::*;

    cfg.set_table(TOTAL_DISTANCE, Goalkeeper, bands5([5600.0, 5400.0, 5200.0, 5000.0]));
    cfg.set_table(TOTAL_DISTANCE, CentralDefender, bands5([10100.0, 9850.0, 9600.0, 9300.0]));
    cfg.set_table(TOTAL_DISTANCE, FullBack, bands5([10700.0, 10450.0, 10150.0, 9800.0]));
    cfg.set_table(TOTAL_DISTANCE, Midfield, bands5([11193.90, 10926.04, 10627.19, 10271.79]));
    cfg.set_table(TOTAL_DISTANCE, WideAttacker, bands5([10900.0, 10600.0, 10300.0, 9950.0]));
    cfg.set_table(TOTAL_DISTANCE, CenterForward, bands5([10500.0, 10250.0, 9950.0, 9600.0]));

    cfg.set_table(RUNNING_DISTANCE, Goalkeeper, bands5([800.0, 720.0, 650.0, 580.0]));
    cfg.set_table(RUNNING_DISTANCE, CentralDefender, bands5([1900.0, 1780.0, 1650.0, 1500.0]));
    cfg.set_table(RUNNING_DISTANCE, FullBack, bands5([2250.0, 2100.0, 1950.0, 1780.0]));
    cfg.set_table(RUNNING_DISTANCE, Midfield, bands5([2450.0, 2300.0, 2150.0, 1950.0]));
    cfg.set_table(RUNNING_DISTANCE, WideAttacker, bands5([2350.0, 2200.0, 2050.0, 1850.0]));
    cfg.set_table(RUNNING_DISTANCE, CenterForward, bands5([2100.0, 1980.0, 1850.0, 1700.0]));

    cfg.set_table(HSR_DISTANCE, Goalkeeper, bands5([120.0, 100.0, 85.0, 70.0]));
    cfg.set_table(HSR_DISTANCE, CentralDefender, bands5([520.0, 470.0, 420.0, 360.0]));
    cfg.set_table(HSR_DISTANCE, FullBack, bands5([760.0, 700.0, 630.0, 550.0]));
    cfg.set_table(HSR_DISTANCE, Midfield, bands5([780.0, 710.0, 640.0, 560.0]));
    cfg.set_table(HSR_DISTANCE, WideAttacker, bands5([820.0, 750.0, 680.0, 590.0]));
    cfg.set_table(HSR_DISTANCE, CenterForward, bands5([740.0, 680.0, 610.0, 530.0]));

    cfg.set_table(SPRINT_COUNT, Goalkeeper, bands5([1.2, 0.9, 0.6, 0.4]));
    cfg.set_table(SPRINT_COUNT, CentralDefender, bands5([7.5, 6.5, 5.5, 4.2]));
    cfg.set_table(SPRINT_COUNT, FullBack, bands5([13.0, 11.5, 10.0, 8.0]));
    cfg.set_table(SPRINT_COUNT, Midfield, bands5([10.5, 9.0, 7.5, 6.0]));
    cfg.set_table(SPRINT_COUNT, WideAttacker, bands5([15.5, 13.5, 11.5, 9.5]));
    cfg.set_table(SPRINT_COUNT, CenterForward, bands5([13.5, 12.0, 10.5, 8.5]));

    cfg.set_table(HIGH_ACCEL_COUNT, Goalkeeper, bands5([1.5, 1.2, 0.9, 0.6]));
    cfg.set_table(HIGH_ACCEL_COUNT, CentralDefender, bands5([4.8, 4.2, 3.6, 2.9]));
    cfg.set_table(HIGH_ACCEL_COUNT, FullBack, bands5([8.6, 7.6, 6.6, 5.4]));
    cfg.set_table(HIGH_ACCEL_COUNT, Midfield, bands5([7.2, 6.3, 5.4, 4.4]));
    cfg.set_table(HIGH_ACCEL_COUNT, WideAttacker, bands5([10.2, 9.0, 7.8, 6.4]));
    cfg.set_table(HIGH_ACCEL_COUNT, CenterForward, bands5([9.0, 8.0, 7.0, 5.8]));

    cfg.set_table(PSV99, Goalkeeper, bands5([28.5, 27.5, 26.5, 25.5]));
    cfg.set_table(PSV99, CentralDefender, bands5([31.8, 31.0, 30.2, 29.2]));
    cfg.set_table(PSV99, FullBack, bands5([32.6, 31.9, 31.1, 30.2]));
    cfg.set_table(PSV99, Midfield, bands5([31.4, 30.6, 29.8, 28.8]));
    cfg.set_table(PSV99, WideAttacker, bands5([33.2, 32.5, 31.7, 30.8]));
    cfg.set_table(PSV99, CenterForward, bands5([32.8, 32.1, 31.3, 30.4]));
}

fn technical_scales(cfg: &mut ScoringConfig) {
    use PositionGroup::*;

    cfg.set_table("OBV Pass P90", CentralDefender, bands5([0.060, 0.040, 0.020, 0.000]));
    cfg.set_table("OBV Pass P90", FullBack, bands5([0.080, 0.055, 0.035, 0.015]));
    cfg.set_table("OBV Pass P90", Midfield, bands5([0.120, 0.090, 0.060, 0.030]));
    cfg.set_table("OBV Pass P90", WideAttacker, bands5([0.100, 0.070, 0.045, 0.020]));
    cfg.set_table("OBV Pass P90", CenterForward, bands5([0.060, 0.040, 0.020, 0.005]));

    cfg.set_table("Deep Progressions P90", CentralDefender, bands5([4.6, 3.8, 3.1, 2.4]));
    cfg.set_table("Deep Progressions P90", FullBack, bands5([6.8, 5.8, 4.9, 3.9]));
    cfg.set_table("Deep Progressions P90", Midfield, bands5([7.6, 6.4, 5.3, 4.2]));

    cfg.set_table("Passing %", CentralDefender, bands5([91.0, 88.5, 86.0, 83.0]));

    cfg.set_table("Aerial Win %", CentralDefender, bands5([72.0, 66.0, 60.0, 53.0]));
    cfg.set_table("Aerial Win %", FullBack, bands5([62.0, 56.0, 50.0, 43.0]));
    cfg.set_table("Aerial Win %", Midfield, bands5([60.0, 54.0, 48.0, 41.0]));
    cfg.set_table("Aerial Win %", CenterForward, bands5([52.0, 46.0, 40.0, 33.0]));

    cfg.set_table("OBV Dribble & Carry P90", CentralDefender, bands5([0.030, 0.020, 0.012, 0.005]));
    cfg.set_table("OBV Dribble & Carry P90", FullBack, bands5([0.070, 0.050, 0.035, 0.020]));
    cfg.set_table("OBV Dribble & Carry P90", WideAttacker, bands5([0.160, 0.120, 0.090, 0.060]));

    cfg.set_table("OP xGAssisted", FullBack, bands5([0.120, 0.090, 0.065, 0.040]));
    cfg.set_table("OP xGAssisted", Midfield, bands5([0.160, 0.120, 0.080, 0.050]));
    cfg.set_table("OP xGAssisted", WideAttacker, bands5([0.220, 0.170, 0.120, 0.080]));

    cfg.set_table("Successful Crosses P90", FullBack, bands5([1.30, 1.00, 0.70, 0.45]));
    cfg.set_table("Successful Crosses P90", WideAttacker, bands5([1.10, 0.85, 0.60, 0.40]));

    cfg.set_table("Dribbles P90", Midfield, bands5([1.40, 1.10, 0.80, 0.50]));
    cfg.set_table("Dribbles P90", WideAttacker, bands5([2.60, 2.10, 1.60, 1.10]));

    cfg.set_table("NP xG P90", Midfield, bands5([0.16, 0.12, 0.08, 0.05]));
    cfg.set_table("NP xG P90", WideAttacker, bands5([0.30, 0.24, 0.18, 0.12]));
    cfg.set_table("NP xG P90", CenterForward, bands5([0.48, 0.40, 0.32, 0.24]));

    cfg.set_table("NP Goals P90", CenterForward, bands5([0.50, 0.40, 0.30, 0.20]));
    cfg.set_table("Shots P90", CenterForward, bands5([3.2, 2.7, 2.2, 1.7]));
    cfg.set_table("OBV Shot P90", CenterForward, bands5([0.100, 0.070, 0.045, 0.020]));
}

fn defensive_scales(cfg: &mut ScoringConfig) {
    use PositionGroup::*;

    cfg.set_table("PAdj Tackles & Interceptions P90", CentralDefender, bands5([4.4, 3.9, 3.4, 2.8]));
    cfg.set_table("PAdj Tackles & Interceptions P90", FullBack, bands5([4.8, 4.2, 3.6, 3.0]));
    cfg.set_table("PAdj Tackles & Interceptions P90", Midfield, bands5([5.2, 4.5, 3.8, 3.1]));
    cfg.set_table("PAdj Tackles & Interceptions P90", WideAttacker, bands5([3.2, 2.7, 2.2, 1.7]));
    cfg.set_table("PAdj Tackles & Interceptions P90", CenterForward, bands5([2.2, 1.8, 1.4, 1.0]));

    cfg.set_table("Defensive Action Regains P90", CentralDefender, bands5([3.4, 3.0, 2.6, 2.1]));
    cfg.set_table("Defensive Action Regains P90", FullBack, bands5([3.8, 3.3, 2.8, 2.3]));
    cfg.set_table("Defensive Action Regains P90", Midfield, bands5([4.4, 3.8, 3.2, 2.6]));
    cfg.set_table("Defensive Action Regains P90", WideAttacker, bands5([2.8, 2.4, 2.0, 1.6]));

    cfg.set_table("Blocks P90", CentralDefender, bands5([1.20, 0.95, 0.70, 0.50]));

    cfg.set_table("Pressure Regains P90", FullBack, bands5([2.6, 2.2, 1.8, 1.4]));
    cfg.set_table("Pressure Regains P90", Midfield, bands5([3.6, 3.1, 2.6, 2.1]));
    cfg.set_table("Pressure Regains P90", WideAttacker, bands5([3.0, 2.6, 2.2, 1.7]));
    cfg.set_table("Pressure Regains P90", CenterForward, bands5([2.4, 2.0, 1.6, 1.2]));
}

fn goalkeeper_scales(cfg: &mut ScoringConfig) {
    use PositionGroup::Goalkeeper;

    cfg.set_table("Save %", Goalkeeper, bands5([74.0, 71.0, 68.0, 64.0]));
    cfg.set_table("GSAA P90", Goalkeeper, bands5([0.12, 0.06, 0.00, -0.08]));
    cfg.set_table("Claims %", Goalkeeper, bands5([92.0, 88.0, 84.0, 79.0]));

    cfg.set_table("OBV Pass P90", Goalkeeper, bands5([0.020, 0.012, 0.006, 0.000]));
    cfg.set_table("Pass %", Goalkeeper, bands5([86.0, 82.0, 78.0, 73.0]));
    cfg.set_table("Deep Progressions P90", Goalkeeper, bands5([1.0, 0.7, 0.5, 0.3]));
}

fn metric_groups(cfg: &mut ScoringConfig) {
    use PositionGroup::*;

    for pos in crate::position::ALL_POSITIONS {
        cfg.set_group(IndexKind::Physical, pos, &PHYSICAL_GROUP);
    }

    cfg.set_group(
        IndexKind::Technical,
        CentralDefender,
        &["OBV Pass P90", "Deep Progressions P90", "Passing %", "Aerial Win %", "OBV Dribble & Carry P90"],
    );
    cfg.set_group(
        IndexKind::Technical,
        FullBack,
        &["OBV Pass P90", "Deep Progressions P90", "OP xGAssisted", "Successful Crosses P90", "OBV Dribble & Carry P90"],
    );
    cfg.set_group(
        IndexKind::Technical,
        Midfield,
        &["OBV Pass P90", "Deep Progressions P90", "OP xGAssisted", "Dribbles P90", "NP xG P90"],
    );
    cfg.set_group(
        IndexKind::Technical,
        WideAttacker,
        &["NP xG P90", "OP xGAssisted", "Dribbles P90", "OBV Dribble & Carry P90", "Successful Crosses P90"],
    );
    cfg.set_group(
        IndexKind::Technical,
        CenterForward,
        &["NP Goals P90", "NP xG P90", "Shots P90", "Aerial Win %", "OBV Shot P90"],
    );

    cfg.set_group(
        IndexKind::Defensive,
        CentralDefender,
        &["PAdj Tackles & Interceptions P90", "Aerial Win %", "Defensive Action Regains P90", "Blocks P90"],
    );
    cfg.set_group(
        IndexKind::Defensive,
        FullBack,
        &["PAdj Tackles & Interceptions P90", "Defensive Action Regains P90", "Aerial Win %", "Pressure Regains P90"],
    );
    cfg.set_group(
        IndexKind::Defensive,
        Midfield,
        &["PAdj Tackles & Interceptions P90", "Pressure Regains P90", "Defensive Action Regains P90", "Aerial Win %"],
    );
    cfg.set_group(
        IndexKind::Defensive,
        WideAttacker,
        &["Pressure Regains P90", "PAdj Tackles & Interceptions P90", "Defensive Action Regains P90"],
    );
    cfg.set_group(
        IndexKind::Defensive,
        CenterForward,
        &["Pressure Regains P90", "Aerial Win %", "PAdj Tackles & Interceptions P90"],
    );

    cfg.set_group(IndexKind::GkSave, Goalkeeper, &["Save %", "GSAA P90", "Claims %"]);
    cfg.set_group(
        IndexKind::GkUsage,
        Goalkeeper,
        &["OBV Pass P90", "Pass %", "Deep Progressions P90"],
    );
}
