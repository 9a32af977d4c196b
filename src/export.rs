use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::rankings::LeaderboardEntry;
use crate::record::{Dataset, PlayerRecord};
use crate::thresholds::index_label;

pub struct ExportReport {
    pub player_rows: usize,
    pub ranking_rows: usize,
    pub errors: Vec<String>,
}

const IDENTITY_HEADER: [&str; 7] = [
    "Player",
    "Team",
    "Season",
    "Competition",
    "Position",
    "Age",
    "Minutes",
];

fn player_row(dataset: &Dataset, rec: &PlayerRecord) -> Vec<String> {
    let mut row = vec![
        rec.player_name.clone(),
        rec.team.clone(),
        rec.season.clone(),
        rec.competition.clone(),
        rec.position_label.clone(),
        rec.age.map(|a| a.to_string()).unwrap_or_default(),
        rec.minutes.map(|m| format!("{m:.0}")).unwrap_or_default(),
    ];
    for col in &dataset.columns {
        row.push(
            rec.metric(col)
                .map(|v| format!("{v}"))
                .unwrap_or_else(|| "NA".to_string()),
        );
    }
    row
}

fn player_header(dataset: &Dataset) -> Vec<String> {
    IDENTITY_HEADER
        .iter()
        .map(|s| s.to_string())
        .chain(dataset.columns.iter().cloned())
        .collect()
}

/// Write the current filtered view as CSV. Returns the data row count.
pub fn export_players_csv(path: &Path, dataset: &Dataset, indices: &[usize]) -> Result<usize> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create csv export {}", path.display()))?;
    writer
        .write_record(player_header(dataset))
        .context("write csv header")?;
    let mut rows = 0usize;
    for idx in indices {
        let Some(rec) = dataset.rows.get(*idx) else {
            continue;
        };
        writer
            .write_record(player_row(dataset, rec))
            .context("write csv row")?;
        rows += 1;
    }
    writer.flush().context("flush csv export")?;
    Ok(rows)
}

/// Write the filtered view and the current leaderboard into one workbook,
/// one sheet each. Sheet-level failures are reported, not fatal.
pub fn export_workbook(
    path: &Path,
    dataset: &Dataset,
    indices: &[usize],
    leaderboard: &[LeaderboardEntry],
) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let mut errors = Vec::new();

    let mut player_rows = 0usize;
    {
        let sheet = workbook.add_worksheet();
        if let Err(err) = write_players_sheet(sheet, dataset, indices, &mut player_rows) {
            errors.push(format!("players sheet: {err}"));
        }
    }

    let mut ranking_rows = 0usize;
    {
        let sheet = workbook.add_worksheet();
        if let Err(err) = write_rankings_sheet(sheet, leaderboard, &mut ranking_rows) {
            errors.push(format!("rankings sheet: {err}"));
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;

    Ok(ExportReport {
        player_rows,
        ranking_rows,
        errors,
    })
}

fn write_players_sheet(
    sheet: &mut Worksheet,
    dataset: &Dataset,
    indices: &[usize],
    rows_out: &mut usize,
) -> Result<()> {
    sheet.set_name("Players")?;
    for (col, name) in player_header(dataset).iter().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }
    let mut row_idx = 1u32;
    for idx in indices {
        let Some(rec) = dataset.rows.get(*idx) else {
            continue;
        };
        for (col, cell) in player_row(dataset, rec).iter().enumerate() {
            sheet.write_string(row_idx, col as u16, cell)?;
        }
        row_idx += 1;
        *rows_out += 1;
    }
    Ok(())
}

fn write_rankings_sheet(
    sheet: &mut Worksheet,
    leaderboard: &[LeaderboardEntry],
    rows_out: &mut usize,
) -> Result<()> {
    sheet.set_name("Rankings")?;

    let mut header = vec![
        "Rank".to_string(),
        "Player".to_string(),
        "Team".to_string(),
        "Competition".to_string(),
        "Season".to_string(),
        "Age".to_string(),
        "Minutes".to_string(),
    ];
    if let Some(first) = leaderboard.first() {
        for (kind, _) in &first.indexes {
            header.push(index_label(*kind).to_string());
        }
    }
    for (col, name) in header.iter().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }

    for (i, entry) in leaderboard.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, entry.rank as f64)?;
        sheet.write_string(row, 1, &entry.player_name)?;
        sheet.write_string(row, 2, &entry.team)?;
        sheet.write_string(row, 3, &entry.competition)?;
        sheet.write_string(row, 4, &entry.season)?;
        if let Some(age) = entry.age {
            sheet.write_number(row, 5, f64::from(age))?;
        }
        if let Some(minutes) = entry.minutes {
            sheet.write_number(row, 6, minutes)?;
        }
        for (j, (_, value)) in entry.indexes.iter().enumerate() {
            sheet.write_number(row, (7 + j) as u16, f64::from(*value))?;
        }
        *rows_out += 1;
    }
    Ok(())
}

/// Transfermarkt quick-search link for a player name.
pub fn transfermarkt_search_url(player_name: &str) -> String {
    format!(
        "https://www.transfermarkt.com/schnellsuche/ergebnis/schnellsuche?query={}",
        urlencoding::encode(player_name.trim())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_is_encoded() {
        let url = transfermarkt_search_url(" Erling Håland ");
        assert!(url.ends_with("query=Erling%20H%C3%A5land"));
    }
}
