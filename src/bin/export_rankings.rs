use std::path::PathBuf;

use scout_terminal::cohort::{DEFAULT_MIN_MINUTES, REFERENCE_COMPETITIONS};
use scout_terminal::dataset::load_bundle;
use scout_terminal::export::export_workbook;
use scout_terminal::metrics::MetricCatalog;
use scout_terminal::position::PositionGroup;
use scout_terminal::rankings::compute_leaderboard;
use scout_terminal::record::DatasetKind;
use scout_terminal::thresholds::{IndexKind, ScoringConfig, index_kinds_for, index_label};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let mut args = std::env::args().skip(1);
    let position = args
        .next()
        .and_then(|raw| PositionGroup::parse(&raw))
        .unwrap_or(PositionGroup::Midfield);
    let season = args.next();
    let out = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("rankings.xlsx"));

    let bundle = load_bundle()?;
    let dataset = bundle.dataset(DatasetKind::Merged);
    let season = match season.or_else(|| dataset.seasons().last().cloned()) {
        Some(season) => season,
        None => {
            eprintln!("merged dataset holds no seasons; nothing to rank");
            return Ok(());
        }
    };

    let catalog = MetricCatalog::builtin();
    let scoring = ScoringConfig::builtin();
    let competitions: Vec<String> = REFERENCE_COMPETITIONS
        .iter()
        .map(|c| c.to_string())
        .collect();
    let sort_index = index_kinds_for(position)
        .first()
        .copied()
        .unwrap_or(IndexKind::Physical);

    let leaderboard = compute_leaderboard(
        &scoring,
        &catalog,
        dataset,
        position,
        &season,
        &competitions,
        Some(DEFAULT_MIN_MINUTES),
        sort_index,
    )?;

    // Workbook gets the whole (unfiltered) merged table plus the leaderboard.
    let indices: Vec<usize> = (0..dataset.rows.len()).collect();
    let report = export_workbook(&out, dataset, &indices, &leaderboard)?;

    println!(
        "{} {} {} — {} ranked rows, {} player rows -> {}",
        position.physical_label(),
        season,
        index_label(sort_index),
        report.ranking_rows,
        report.player_rows,
        out.display()
    );
    for err in report.errors {
        eprintln!("warning: {err}");
    }
    Ok(())
}
