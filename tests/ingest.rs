use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use scout_terminal::dataset::read_dataset;
use scout_terminal::filter::{ViewFilter, filter_records};
use scout_terminal::metrics::MetricCatalog;
use scout_terminal::position::PositionGroup;
use scout_terminal::record::{Dataset, DatasetKind};
use scout_terminal::scatter::build_scatter;
use scout_terminal::score_index::composite_index;
use scout_terminal::thresholds::{IndexKind, ScoringConfig};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn physical() -> Dataset {
    read_dataset(read_fixture("physical_sample.csv").as_bytes(), DatasetKind::Physical)
        .expect("physical fixture should parse")
}

fn technical() -> Dataset {
    read_dataset(read_fixture("technical_sample.csv").as_bytes(), DatasetKind::Technical)
        .expect("technical fixture should parse")
}

#[test]
fn headers_are_trimmed_and_junk_columns_dropped() {
    let ds = physical();
    assert!(ds.columns.iter().any(|c| c == "Distance P90"));
    assert!(!ds.columns.iter().any(|c| c == "Team ID"));
    assert!(!ds.columns.iter().any(|c| c == "TOP 3 Time to HSR"));
    // Identity fields never show up as metric columns.
    assert!(!ds.columns.iter().any(|c| c == "Player" || c == "Season"));
}

#[test]
fn unparseable_cells_become_missing_not_zero() {
    let ds = physical();
    let weiss = ds
        .rows
        .iter()
        .find(|r| r.player_name == "Jonas Weiss")
        .unwrap();
    assert_eq!(weiss.metric("HSR Distance P90"), None);
    assert_eq!(weiss.metric("Distance P90"), Some(9700.2));
}

#[test]
fn both_position_label_schemes_parse_at_ingest() {
    let phys = physical();
    let tech = technical();
    let benali_phys = phys.rows.iter().find(|r| r.player_name == "Ilyes Benali").unwrap();
    let benali_tech = tech.rows.iter().find(|r| r.player_name == "Ilyes Benali").unwrap();
    assert_eq!(benali_phys.position, Some(PositionGroup::Midfield));
    assert_eq!(benali_tech.position, Some(PositionGroup::Midfield));

    let ferri = tech.rows.iter().find(|r| r.player_name == "Luca Ferri").unwrap();
    assert_eq!(ferri.position, Some(PositionGroup::WideAttacker));
}

#[test]
fn ages_come_from_the_age_column_or_the_birthdate() {
    let tech = technical();
    let reyes = tech.rows.iter().find(|r| r.player_name == "Marco Reyes").unwrap();
    assert_eq!(reyes.age, Some(29));

    let phys = physical();
    let benali = phys.rows.iter().find(|r| r.player_name == "Ilyes Benali").unwrap();
    let age = benali.age.expect("birthdate-derived age");
    assert!((20..=40).contains(&age), "implausible derived age {age}");
}

#[test]
fn alias_resolution_bridges_dataset_spellings() {
    let tech = technical();
    let catalog = MetricCatalog::builtin();
    // The fixture spells it "Op xA P90"; the logical name still resolves.
    let column = catalog.resolve(&tech.columns, "OP xGAssisted").unwrap();
    assert_eq!(column, "Op xA P90");
}

#[test]
fn physical_index_scores_resolved_columns_and_charges_unresolved_ones() {
    let ds = physical();
    let catalog = MetricCatalog::builtin();
    let cfg = ScoringConfig::builtin();
    let benali = ds.rows.iter().find(|r| r.player_name == "Ilyes Benali").unwrap();

    let out = composite_index(
        &cfg,
        &catalog,
        &ds.columns,
        benali,
        IndexKind::Physical,
        PositionGroup::Midfield,
    )
    .unwrap();
    // distance 10, hsr 5, top-speed 7; the three absent columns score 0 but
    // stay in the denominator.
    assert_eq!(out.total, 22);
    assert_eq!(out.max, 60);
    assert_eq!(out.index, 37);
}

#[test]
fn extra_players_are_unioned_past_the_filters() {
    let ds = physical();
    let filter = ViewFilter {
        positions: [PositionGroup::Midfield].into_iter().collect(),
        extra_players: vec!["S. Okafor".to_string()],
        ..Default::default()
    };
    let indices = filter_records(&ds.rows, &filter);
    let names: Vec<&str> = indices
        .iter()
        .map(|i| ds.rows[*i].player_name.as_str())
        .collect();
    assert!(names.contains(&"Ilyes Benali"));
    assert!(names.contains(&"Sam Okafor"));
    assert!(!names.contains(&"Jonas Weiss"));
}

#[test]
fn scatter_from_loaded_rows_skips_incomplete_pairs() {
    let ds = physical();
    let catalog = MetricCatalog::builtin();
    let records: Vec<_> = ds.rows.iter().collect();
    let mut rng = StdRng::seed_from_u64(11);

    let data = build_scatter(
        &catalog,
        &ds.columns,
        &records,
        "Distance P90",
        "HSR Distance P90",
        &HashSet::new(),
        &mut rng,
    )
    .unwrap();
    // Weiss has no HSR value and drops out.
    assert_eq!(data.points.len(), ds.rows.len() - 1);
    assert!(data.points.iter().all(|p| p.label != "J. Weiss"));
}
