use std::fs;
use std::path::PathBuf;

use scout_terminal::dataset::read_dataset;
use scout_terminal::export::{export_players_csv, export_workbook};
use scout_terminal::metrics::MetricCatalog;
use scout_terminal::position::PositionGroup;
use scout_terminal::rankings::compute_leaderboard;
use scout_terminal::record::{Dataset, DatasetKind};
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

fn temp_path(suffix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("scout_terminal_{}_{suffix}", std::process::id()))
}

#[test]
fn csv_export_writes_header_plus_one_line_per_row() {
    let ds = physical();
    let indices: Vec<usize> = (0..ds.rows.len()).collect();
    let path = temp_path("players.csv");

    let rows = export_players_csv(&path, &ds, &indices).unwrap();
    assert_eq!(rows, ds.rows.len());

    let raw = fs::read_to_string(&path).unwrap();
    let mut lines = raw.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("Player,Team,Season,Competition"));
    assert!(header.contains("Distance P90"));
    assert_eq!(lines.count(), ds.rows.len());

    let _ = fs::remove_file(&path);
}

#[test]
fn workbook_export_reports_both_sheets() {
    let ds = physical();
    let comps: Vec<String> = scout_terminal::cohort::REFERENCE_COMPETITIONS
        .iter()
        .map(|c| c.to_string())
        .collect();
    let leaderboard = compute_leaderboard(
        &ScoringConfig::builtin(),
        &MetricCatalog::builtin(),
        &ds,
        PositionGroup::Midfield,
        "2024/2025",
        &comps,
        None,
        IndexKind::Physical,
    )
    .unwrap();
    assert!(!leaderboard.is_empty());

    let indices: Vec<usize> = (0..ds.rows.len()).collect();
    let path = temp_path("export.xlsx");
    let report = export_workbook(&path, &ds, &indices, &leaderboard).unwrap();
    assert_eq!(report.player_rows, ds.rows.len());
    assert_eq!(report.ranking_rows, leaderboard.len());
    assert!(report.errors.is_empty(), "unexpected sheet errors: {:?}", report.errors);

    let _ = fs::remove_file(&path);
}
