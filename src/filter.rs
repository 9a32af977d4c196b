use std::collections::HashSet;

use crate::position::PositionGroup;
use crate::record::PlayerRecord;

/// User-driven slice of a dataset. Empty position/competition sets mean "no
/// restriction". Extra players are unioned in past every other filter.
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    pub positions: HashSet<PositionGroup>,
    pub competitions: HashSet<String>,
    pub seasons: HashSet<String>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub min_minutes: Option<f64>,
    pub extra_players: Vec<String>,
}

impl ViewFilter {
    fn matches(&self, rec: &PlayerRecord) -> bool {
        if !self.positions.is_empty() {
            match rec.position {
                Some(pos) if self.positions.contains(&pos) => {}
                _ => return false,
            }
        }
        if !self.competitions.is_empty() && !self.competitions.contains(&rec.competition) {
            return false;
        }
        if !self.seasons.is_empty() && !self.seasons.contains(&rec.season) {
            return false;
        }
        if let Some(lo) = self.age_min
            && !rec.age.is_some_and(|a| a >= lo)
        {
            return false;
        }
        if let Some(hi) = self.age_max
            && !rec.age.is_some_and(|a| a <= hi)
        {
            return false;
        }
        if let Some(floor) = self.min_minutes
            && !rec.minutes.is_some_and(|m| m >= floor)
        {
            return false;
        }
        true
    }

    fn is_extra(&self, rec: &PlayerRecord) -> bool {
        self.extra_players
            .iter()
            .any(|name| name == rec.display_name() || name == &rec.player_name)
    }
}

/// Apply the filter, returning row indices into `records`. Extra players are
/// appended after the filtered block, de-duplicated against it; records are
/// never copied or mutated.
pub fn filter_records(records: &[PlayerRecord], filter: &ViewFilter) -> Vec<usize> {
    let mut out: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, rec)| filter.matches(rec))
        .map(|(idx, _)| idx)
        .collect();

    if !filter.extra_players.is_empty() {
        let selected: HashSet<usize> = out.iter().copied().collect();
        for (idx, rec) in records.iter().enumerate() {
            if !selected.contains(&idx) && filter.is_extra(rec) {
                out.push(idx);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, pos: PositionGroup, age: u32, minutes: f64) -> PlayerRecord {
        PlayerRecord {
            player_name: name.to_string(),
            position: Some(pos),
            age: Some(age),
            minutes: Some(minutes),
            season: "2024/2025".to_string(),
            competition: "Serie A".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn extra_players_bypass_filters_without_duplicates() {
        let records = vec![
            rec("A", PositionGroup::Midfield, 24, 1200.0),
            rec("B", PositionGroup::CenterForward, 31, 900.0),
            rec("C", PositionGroup::Midfield, 19, 400.0),
        ];
        let filter = ViewFilter {
            positions: [PositionGroup::Midfield].into_iter().collect(),
            min_minutes: Some(600.0),
            extra_players: vec!["B".to_string(), "A".to_string()],
            ..Default::default()
        };
        let idx = filter_records(&records, &filter);
        // A matches the filter; B is pulled in as an extra; A is not doubled.
        assert_eq!(idx, vec![0, 1]);
    }

    #[test]
    fn age_range_excludes_unknown_ages() {
        let mut no_age = rec("D", PositionGroup::Midfield, 0, 900.0);
        no_age.age = None;
        let records = vec![no_age, rec("E", PositionGroup::Midfield, 22, 900.0)];
        let filter = ViewFilter {
            age_min: Some(18),
            age_max: Some(30),
            ..Default::default()
        };
        assert_eq!(filter_records(&records, &filter), vec![1]);
    }
}
