use std::collections::{HashSet, VecDeque};

use crate::cohort::DEFAULT_MIN_MINUTES;
use crate::dataset::DataBundle;
use crate::filter::{ViewFilter, filter_records};
use crate::metrics::MetricCatalog;
use crate::position::{ALL_POSITIONS, PositionGroup};
use crate::record::{ALL_DATASET_KINDS, Dataset, DatasetKind, PlayerRecord};
use crate::thresholds::{IndexKind, ScoringConfig, index_kinds_for};

const LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Players,
    Scatter,
    PlayerDetail,
    Rankings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Name,
    Minutes,
    Age,
}

pub const MINUTES_PRESETS: [Option<f64>; 4] =
    [None, Some(300.0), Some(DEFAULT_MIN_MINUTES), Some(900.0)];

pub const AGE_PRESETS: [(Option<u32>, Option<u32>, &str); 5] = [
    (None, None, "All ages"),
    (None, Some(21), "U21"),
    (None, Some(23), "U23"),
    (Some(24), Some(29), "24-29"),
    (Some(30), None, "30+"),
];

pub struct AppState {
    pub bundle: DataBundle,
    pub catalog: MetricCatalog,
    pub scoring: ScoringConfig,

    pub screen: Screen,
    pub dataset_kind: DatasetKind,
    pub position_filter: Option<PositionGroup>,
    pub competition_filter: Option<String>,
    pub season_filter: Option<String>,
    pub minutes_cursor: usize,
    pub age_cursor: usize,
    pub sort: SortMode,
    pub selected: usize,

    pub x_metric: usize,
    pub y_metric: usize,
    pub highlights: HashSet<String>,
    pub pinned: Vec<String>,

    pub rankings_position: PositionGroup,
    pub rankings_index: usize,
    pub rankings_selected: usize,

    pub help_overlay: bool,
    pub log: VecDeque<String>,
}

impl AppState {
    pub fn new(bundle: DataBundle) -> Self {
        Self {
            bundle,
            catalog: MetricCatalog::builtin(),
            scoring: ScoringConfig::builtin(),
            screen: Screen::Players,
            dataset_kind: DatasetKind::Merged,
            position_filter: None,
            competition_filter: None,
            season_filter: None,
            minutes_cursor: 0,
            age_cursor: 0,
            sort: SortMode::Name,
            selected: 0,
            x_metric: 0,
            y_metric: 1,
            highlights: HashSet::new(),
            pinned: Vec::new(),
            rankings_position: PositionGroup::Midfield,
            rankings_index: 0,
            rankings_selected: 0,
            help_overlay: false,
            log: VecDeque::new(),
        }
    }

    pub fn active(&self) -> &Dataset {
        self.bundle.dataset(self.dataset_kind)
    }

    pub fn view_filter(&self) -> ViewFilter {
        let (age_min, age_max, _) = AGE_PRESETS[self.age_cursor % AGE_PRESETS.len()];
        ViewFilter {
            positions: self.position_filter.into_iter().collect(),
            competitions: self.competition_filter.iter().cloned().collect(),
            seasons: self.season_filter.iter().cloned().collect(),
            age_min,
            age_max,
            min_minutes: self.min_minutes(),
            extra_players: self.pinned.clone(),
        }
    }

    pub fn min_minutes(&self) -> Option<f64> {
        MINUTES_PRESETS[self.minutes_cursor % MINUTES_PRESETS.len()]
    }

    pub fn age_label(&self) -> &'static str {
        AGE_PRESETS[self.age_cursor % AGE_PRESETS.len()].2
    }

    /// Filtered row indices into the active dataset, in the current sort.
    pub fn filtered_indices(&self) -> Vec<usize> {
        let dataset = self.active();
        let mut indices = filter_records(&dataset.rows, &self.view_filter());
        let rows = &dataset.rows;
        match self.sort {
            SortMode::Name => {
                indices.sort_by(|a, b| rows[*a].display_name().cmp(rows[*b].display_name()));
            }
            SortMode::Minutes => {
                indices.sort_by(|a, b| {
                    let ma = rows[*a].minutes.unwrap_or(0.0);
                    let mb = rows[*b].minutes.unwrap_or(0.0);
                    mb.partial_cmp(&ma).unwrap_or(std::cmp::Ordering::Equal)
                });
            }
            SortMode::Age => {
                indices.sort_by_key(|i| rows[*i].age.unwrap_or(0));
            }
        }
        indices
    }

    pub fn selected_record(&self) -> Option<&PlayerRecord> {
        let indices = self.filtered_indices();
        let idx = *indices.get(self.selected)?;
        self.active().rows.get(idx)
    }

    pub fn select_next(&mut self) {
        let n = self.filtered_indices().len();
        if n > 0 && self.selected + 1 < n {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        let n = self.filtered_indices().len();
        if n == 0 {
            self.selected = 0;
        } else if self.selected >= n {
            self.selected = n - 1;
        }
    }

    pub fn cycle_dataset(&mut self) {
        let idx = ALL_DATASET_KINDS
            .iter()
            .position(|k| *k == self.dataset_kind)
            .unwrap_or(0);
        self.dataset_kind = ALL_DATASET_KINDS[(idx + 1) % ALL_DATASET_KINDS.len()];
        // Metric cursors, label filters and the selection are dataset-relative.
        self.x_metric = 0;
        self.y_metric = 1;
        self.selected = 0;
        self.season_filter = None;
        self.competition_filter = None;
    }

    pub fn cycle_position_filter(&mut self) {
        self.position_filter = match self.position_filter {
            None => Some(ALL_POSITIONS[0]),
            Some(pos) => {
                let idx = ALL_POSITIONS.iter().position(|p| *p == pos).unwrap_or(0);
                if idx + 1 < ALL_POSITIONS.len() {
                    Some(ALL_POSITIONS[idx + 1])
                } else {
                    None
                }
            }
        };
        self.clamp_selection();
    }

    pub fn cycle_season_filter(&mut self) {
        self.season_filter = cycle_label(self.active().seasons(), self.season_filter.take());
        self.clamp_selection();
    }

    pub fn cycle_competition_filter(&mut self) {
        self.competition_filter =
            cycle_label(self.active().competitions(), self.competition_filter.take());
        self.clamp_selection();
    }

    pub fn cycle_minutes(&mut self) {
        self.minutes_cursor = (self.minutes_cursor + 1) % MINUTES_PRESETS.len();
        self.clamp_selection();
    }

    pub fn cycle_age(&mut self) {
        self.age_cursor = (self.age_cursor + 1) % AGE_PRESETS.len();
        self.clamp_selection();
    }

    pub fn cycle_sort(&mut self) {
        self.sort = match self.sort {
            SortMode::Name => SortMode::Minutes,
            SortMode::Minutes => SortMode::Age,
            SortMode::Age => SortMode::Name,
        };
    }

    pub fn cycle_x_metric(&mut self) {
        let n = self.active().columns.len();
        if n > 0 {
            self.x_metric = (self.x_metric + 1) % n;
        }
    }

    pub fn cycle_y_metric(&mut self) {
        let n = self.active().columns.len();
        if n > 0 {
            self.y_metric = (self.y_metric + 1) % n;
        }
    }

    pub fn x_metric_name(&self) -> Option<&str> {
        self.active().columns.get(self.x_metric).map(String::as_str)
    }

    pub fn y_metric_name(&self) -> Option<&str> {
        self.active().columns.get(self.y_metric).map(String::as_str)
    }

    pub fn toggle_highlight(&mut self) {
        let Some(name) = self.selected_record().map(|r| r.display_name().to_string()) else {
            return;
        };
        if !self.highlights.remove(&name) {
            self.highlights.insert(name);
        }
    }

    pub fn toggle_pin(&mut self) {
        let Some(name) = self.selected_record().map(|r| r.display_name().to_string()) else {
            return;
        };
        if let Some(idx) = self.pinned.iter().position(|p| *p == name) {
            self.pinned.remove(idx);
        } else {
            self.pinned.push(name);
        }
    }

    pub fn cycle_rankings_position(&mut self) {
        let idx = ALL_POSITIONS
            .iter()
            .position(|p| *p == self.rankings_position)
            .unwrap_or(0);
        self.rankings_position = ALL_POSITIONS[(idx + 1) % ALL_POSITIONS.len()];
        self.rankings_index = 0;
        self.rankings_selected = 0;
    }

    pub fn cycle_rankings_index(&mut self) {
        let kinds = index_kinds_for(self.rankings_position);
        self.rankings_index = (self.rankings_index + 1) % kinds.len();
    }

    pub fn rankings_index_kind(&self) -> IndexKind {
        let kinds = index_kinds_for(self.rankings_position);
        kinds[self.rankings_index % kinds.len()]
    }

    /// Season fed to the rankings cohort: the explicit filter when set, else
    /// the newest season present in the active dataset.
    pub fn rankings_season(&self) -> Option<String> {
        self.season_filter
            .clone()
            .or_else(|| self.active().seasons().last().cloned())
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        if self.log.len() >= LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(msg.into());
    }
}

fn cycle_label(options: Vec<String>, current: Option<String>) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    match current {
        None => Some(options[0].clone()),
        Some(cur) => {
            let idx = options.iter().position(|o| *o == cur);
            match idx {
                Some(i) if i + 1 < options.len() => Some(options[i + 1].clone()),
                _ => None,
            }
        }
    }
}
