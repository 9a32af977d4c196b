use scout_terminal::error::ScoreError;
use scout_terminal::metrics::MetricCatalog;
use scout_terminal::position::{ALL_POSITIONS, PositionGroup};
use scout_terminal::record::PlayerRecord;
use scout_terminal::score_index::composite_index;
use scout_terminal::thresholds::{
    Band, IndexKind, PHYSICAL_GROUP, ScoringConfig, TOTAL_DISTANCE, ThresholdTable, bands5,
    index_kinds_for,
};

fn record_with(metrics: &[(&str, f64)]) -> PlayerRecord {
    PlayerRecord {
        player_name: "Fixture".to_string(),
        metrics: metrics.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        ..Default::default()
    }
}

#[test]
fn half_open_boundary_law() {
    // Two adjacent brackets sharing the 20.0 boundary: the value belongs to
    // the bracket whose min it is, never the one whose max it is.
    let table = ThresholdTable::new(vec![
        Band { min: Some(20.0), max: Some(30.0), points: 3 },
        Band { min: Some(10.0), max: Some(20.0), points: 5 },
        Band { min: None, max: Some(10.0), points: 0 },
        Band { min: Some(30.0), max: None, points: 7 },
    ]);
    assert_eq!(table.score(20.0), 3);
    assert_eq!(table.score(19.999), 5);
    assert_eq!(table.score(10.0), 5);
    assert_eq!(table.score(30.0), 7);
}

#[test]
fn builtin_scales_cover_the_real_line_without_overlap() {
    let cfg = ScoringConfig::builtin();
    for pos in ALL_POSITIONS {
        for kind in index_kinds_for(pos) {
            for metric in cfg.group(*kind, pos).unwrap() {
                let table = cfg.table(metric, pos).unwrap();
                let mut probes = vec![-1e12, 0.0, 1e12];
                for band in table.bands() {
                    for bound in [band.min, band.max].into_iter().flatten() {
                        probes.push(bound);
                        probes.push(bound - 1e-6);
                        probes.push(bound + 1e-6);
                    }
                }
                for v in probes {
                    let matches = table.bands().iter().filter(|b| {
                        (b.min.is_none_or(|lo| v >= lo)) && (b.max.is_none_or(|hi| v < hi))
                    });
                    assert_eq!(
                        matches.count(),
                        1,
                        "{metric} @ {pos:?}: probe {v} must match exactly one band"
                    );
                }
            }
        }
    }
}

#[test]
fn midfield_total_distance_reference_values() {
    let cfg = ScoringConfig::builtin();
    let pos = PositionGroup::Midfield;
    assert_eq!(cfg.score(TOTAL_DISTANCE, pos, Some(11500.0)).unwrap(), 10);
    assert_eq!(cfg.score(TOTAL_DISTANCE, pos, Some(f64::NAN)).unwrap(), 0);
    // 10926.04 is both the max of the 5-point bracket and the min of the
    // 7-point bracket; half-open brackets put it in the latter.
    assert_eq!(cfg.score(TOTAL_DISTANCE, pos, Some(10926.04)).unwrap(), 7);
    assert_eq!(cfg.score(TOTAL_DISTANCE, pos, Some(10700.0)).unwrap(), 5);
}

#[test]
fn composite_index_stays_within_bounds() {
    let cfg = ScoringConfig::builtin();
    let catalog = MetricCatalog::builtin();
    let columns: Vec<String> = PHYSICAL_GROUP.iter().map(|m| m.to_string()).collect();

    for pos in ALL_POSITIONS {
        for raw in [-5000.0, 0.0, 300.0, 5500.0, 9800.0, 10926.04, 12500.0, 1e9] {
            let rec = record_with(&PHYSICAL_GROUP.map(|m| (m, raw)));
            let out = composite_index(&cfg, &catalog, &columns, &rec, IndexKind::Physical, pos)
                .unwrap();
            assert!(out.index <= 100, "{pos:?} raw {raw} gave index {}", out.index);
            assert!(out.total <= out.max);
        }
    }
}

#[test]
fn scale_missing_error_names_metric_and_position() {
    let mut cfg = ScoringConfig::new();
    cfg.set_group(IndexKind::Technical, PositionGroup::FullBack, &["OBV Pass P90"]);
    let err = composite_index(
        &cfg,
        &MetricCatalog::builtin(),
        &["OBV Pass P90".to_string()],
        &record_with(&[("OBV Pass P90", 0.08)]),
        IndexKind::Technical,
        PositionGroup::FullBack,
    )
    .unwrap_err();
    match &err {
        ScoreError::ScaleMissing { metric, position } => {
            assert_eq!(metric, "OBV Pass P90");
            assert_eq!(*position, PositionGroup::FullBack);
        }
        other => panic!("expected ScaleMissing, got {other:?}"),
    }
    let msg = err.to_string();
    assert!(msg.contains("Full Back"), "message should name the position: {msg}");
}

#[test]
fn synthetic_tables_plug_into_the_engine() {
    // The config is plain data; a test can run the whole scoring path on a
    // scale that never ships.
    let mut cfg = ScoringConfig::new();
    cfg.set_table("made up", PositionGroup::Goalkeeper, bands5([4.0, 3.0, 2.0, 1.0]));
    cfg.set_group(IndexKind::GkSave, PositionGroup::Goalkeeper, &["made up"]);

    let out = composite_index(
        &cfg,
        &MetricCatalog::builtin(),
        &["made up".to_string()],
        &record_with(&[("made up", 3.5)]),
        IndexKind::GkSave,
        PositionGroup::Goalkeeper,
    )
    .unwrap();
    assert_eq!(out.total, 7);
    assert_eq!(out.index, 70);
}
