use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::position::PositionGroup;
use crate::record::DatasetKind;
use crate::state::AppState;

const CACHE_DIR: &str = "scout_terminal";
const CACHE_FILE: &str = "prefs.json";
const CACHE_VERSION: u32 = 1;

/// Persisted UI selections only — never data or derived values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PrefsFile {
    version: u32,
    dataset: Option<DatasetKind>,
    position: Option<PositionGroup>,
    competition: Option<String>,
    season: Option<String>,
    minutes_cursor: usize,
    age_cursor: usize,
    #[serde(default)]
    highlights: Vec<String>,
    #[serde(default)]
    pinned: Vec<String>,
}

pub fn load_into_state(state: &mut AppState) {
    let Some(path) = prefs_path() else {
        return;
    };
    let Some(prefs) = read_prefs(&path) else {
        return;
    };
    if prefs.version != CACHE_VERSION {
        return;
    }

    if let Some(kind) = prefs.dataset {
        state.dataset_kind = kind;
    }
    state.position_filter = prefs.position;
    state.competition_filter = prefs.competition;
    state.season_filter = prefs.season;
    state.minutes_cursor = prefs.minutes_cursor;
    state.age_cursor = prefs.age_cursor;
    state.highlights = prefs.highlights.into_iter().collect();
    state.pinned = prefs.pinned;
    state.clamp_selection();
}

pub fn save_from_state(state: &AppState) {
    let Some(path) = prefs_path() else {
        return;
    };
    let Some(dir) = path.parent() else {
        return;
    };
    let _ = fs::create_dir_all(dir);

    let prefs = PrefsFile {
        version: CACHE_VERSION,
        dataset: Some(state.dataset_kind),
        position: state.position_filter,
        competition: state.competition_filter.clone(),
        season: state.season_filter.clone(),
        minutes_cursor: state.minutes_cursor,
        age_cursor: state.age_cursor,
        highlights: state.highlights.iter().cloned().collect(),
        pinned: state.pinned.clone(),
    };

    if let Ok(json) = serde_json::to_string(&prefs) {
        let tmp = path.with_extension("json.tmp");
        if fs::write(&tmp, json).is_ok() {
            let _ = fs::rename(&tmp, &path);
        }
    }
}

fn read_prefs(path: &Path) -> Option<PrefsFile> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

fn prefs_path() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}
