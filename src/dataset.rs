use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};

use crate::position::PositionGroup;
use crate::record::{Dataset, DatasetKind, PlayerRecord};

/// Export-tool bookkeeping columns that carry no signal; dropped at ingest.
const JUNK_COLUMNS: &[&str] = &[
    "Team ID",
    "Competition ID",
    "Season ID",
    "Player ID",
    "Count Performances (Physical Check passed)",
    "Count Performances (Physical Check failed)",
    "TOP 3 Time to HSR",
    "TOP 3 Time to Sprint",
];

const PLAYER_COLUMNS: &[&str] = &["Player", "Player Name", "Full Name"];
const SHORT_NAME_COLUMNS: &[&str] = &["Short Name", "Display Name"];
const TEAM_COLUMNS: &[&str] = &["Team", "Team Name", "Club"];
const SEASON_COLUMNS: &[&str] = &["Season", "Season Name"];
const COMPETITION_COLUMNS: &[&str] = &["Competition", "Competition Name"];
const POSITION_COLUMNS: &[&str] = &["Position Group", "Primary Position", "Position"];
const BIRTHDATE_COLUMNS: &[&str] = &["Birthdate", "Birth Date", "Date of Birth"];
const AGE_COLUMNS: &[&str] = &["Age"];
const MINUTES_COLUMNS: &[&str] = &["Minutes", "Minutes Played"];

#[derive(Debug, Clone)]
pub struct DataBundle {
    pub physical: Dataset,
    pub technical: Dataset,
    pub merged: Dataset,
}

impl DataBundle {
    pub fn dataset(&self, kind: DatasetKind) -> &Dataset {
        match kind {
            DatasetKind::Physical => &self.physical,
            DatasetKind::Technical => &self.technical,
            DatasetKind::Merged => &self.merged,
        }
    }
}

pub fn physical_path() -> PathBuf {
    env_path("SCOUT_PHYSICAL_CSV", "data/physical.csv")
}

pub fn technical_path() -> PathBuf {
    env_path("SCOUT_TECHNICAL_CSV", "data/technical.csv")
}

pub fn merged_path() -> PathBuf {
    env_path("SCOUT_MERGED_CSV", "data/merged.csv")
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Load all three datasets. Loaded once at startup; everything downstream
/// borrows read-only.
pub fn load_bundle() -> Result<DataBundle> {
    Ok(DataBundle {
        physical: load_dataset(&physical_path(), DatasetKind::Physical)?,
        technical: load_dataset(&technical_path(), DatasetKind::Technical)?,
        merged: load_dataset(&merged_path(), DatasetKind::Merged)?,
    })
}

pub fn load_dataset(path: &Path, kind: DatasetKind) -> Result<Dataset> {
    let file =
        File::open(path).with_context(|| format!("open dataset file {}", path.display()))?;
    read_dataset(file, kind).with_context(|| format!("parse dataset {}", path.display()))
}

/// Parse one CSV table. Headers are whitespace-trimmed and junk columns
/// dropped; every remaining non-identity column becomes a metric column.
/// Cells that do not parse as numbers are recorded as missing, never as 0.
pub fn read_dataset<R: Read>(reader: R, kind: DatasetKind) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .context("read csv header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let player_idx = find_column(&headers, PLAYER_COLUMNS);
    let short_idx = find_column(&headers, SHORT_NAME_COLUMNS);
    let team_idx = find_column(&headers, TEAM_COLUMNS);
    let season_idx = find_column(&headers, SEASON_COLUMNS);
    let competition_idx = find_column(&headers, COMPETITION_COLUMNS);
    let position_idx = find_column(&headers, POSITION_COLUMNS);
    let birthdate_idx = find_column(&headers, BIRTHDATE_COLUMNS);
    let age_idx = find_column(&headers, AGE_COLUMNS);
    let minutes_idx = find_column(&headers, MINUTES_COLUMNS);

    let identity: Vec<Option<usize>> = vec![
        player_idx,
        short_idx,
        team_idx,
        season_idx,
        competition_idx,
        position_idx,
        birthdate_idx,
        age_idx,
        minutes_idx,
    ];

    let mut metric_columns: Vec<(usize, String)> = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        if name.is_empty() {
            continue;
        }
        if JUNK_COLUMNS.contains(&name.as_str()) {
            continue;
        }
        if identity.contains(&Some(idx)) {
            continue;
        }
        metric_columns.push((idx, name.clone()));
    }

    let current_year = Utc::now().year();
    let mut rows = Vec::new();
    for row in rdr.records() {
        let row = row.context("read csv row")?;
        let field = |idx: Option<usize>| -> String {
            idx.and_then(|i| row.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let position_label = field(position_idx);
        let birthdate = {
            let raw = field(birthdate_idx);
            if raw.is_empty() { None } else { Some(raw) }
        };
        let age = parse_number(&field(age_idx))
            .map(|v| v as u32)
            .or_else(|| {
                birthdate
                    .as_deref()
                    .and_then(|b| age_from_birthdate(b, current_year))
            });

        let mut record = PlayerRecord {
            player_name: field(player_idx),
            short_name: field(short_idx),
            team: field(team_idx),
            season: field(season_idx),
            competition: field(competition_idx),
            position: PositionGroup::parse(&position_label),
            position_label,
            birthdate,
            age,
            minutes: minutes_idx.and_then(|i| row.get(i)).and_then(parse_number),
            metrics: Default::default(),
        };

        for (idx, name) in &metric_columns {
            if let Some(value) = row.get(*idx).and_then(parse_number) {
                record.metrics.insert(name.clone(), value);
            }
        }
        rows.push(record);
    }

    Ok(Dataset {
        kind,
        columns: metric_columns.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}

fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    for cand in candidates {
        if let Some(idx) = headers.iter().position(|h| h == cand) {
            return Some(idx);
        }
    }
    for cand in candidates {
        if let Some(idx) = headers.iter().position(|h| h.eq_ignore_ascii_case(cand)) {
            return Some(idx);
        }
    }
    None
}

/// Lenient numeric parse: strips thousands separators and stray decoration,
/// returns `None` for anything that still is not a number.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Age as of `current_year`, from a birthdate whose first four characters are
/// the year ("1998-04-17", "1998/04/17").
pub fn age_from_birthdate(birthdate: &str, current_year: i32) -> Option<u32> {
    let year: i32 = birthdate.trim().get(..4)?.parse().ok()?;
    let age = current_year - year;
    (0..=60).contains(&age).then_some(age as u32)
}
