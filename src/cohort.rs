use crate::position::PositionGroup;
use crate::record::PlayerRecord;

/// Competitions preferred as the peer reference population.
pub const REFERENCE_COMPETITIONS: [&str; 7] = [
    "Premier League",
    "La Liga",
    "Serie A",
    "Bundesliga",
    "Ligue 1",
    "Champions League",
    "Eredivisie",
];

pub const DEFAULT_MIN_MINUTES: f64 = 600.0;

#[derive(Debug, Clone)]
pub struct CohortFilter<'a> {
    pub position: PositionGroup,
    pub season: &'a str,
    pub competitions: &'a [String],
    pub min_minutes: Option<f64>,
}

/// Repair the known-malformed equal-years season label: "2025/2025" becomes
/// "2024/2025". Returns `None` for well-formed or unrecognized labels.
pub fn repair_season_label(season: &str) -> Option<String> {
    let (first, second) = season.split_once('/')?;
    if first.len() != 4 || second.len() != 4 || first != second {
        return None;
    }
    let year: u32 = first.parse().ok()?;
    let prev = year.checked_sub(1)?;
    Some(format!("{prev}/{year}"))
}

/// Select the peer cohort for percentile ranking.
///
/// Cascade, each step only when the previous found nothing:
/// 1. position + season + allowed competitions (+ minutes floor);
/// 2. same, with the season label repaired when it is the malformed
///    equal-years form;
/// 3. drop the competition restriction (season as given, then repaired);
/// 4. give up — the empty cohort is a defined state (percentile 0, rank "—").
pub fn select_cohort<'a>(
    records: &'a [PlayerRecord],
    filter: &CohortFilter<'_>,
) -> Vec<&'a PlayerRecord> {
    let repaired = repair_season_label(filter.season);

    let subset = matching(records, filter, filter.season, true);
    if !subset.is_empty() {
        return subset;
    }
    if let Some(season) = &repaired {
        let subset = matching(records, filter, season, true);
        if !subset.is_empty() {
            return subset;
        }
    }
    let subset = matching(records, filter, filter.season, false);
    if !subset.is_empty() {
        return subset;
    }
    if let Some(season) = &repaired {
        let subset = matching(records, filter, season, false);
        if !subset.is_empty() {
            return subset;
        }
    }
    Vec::new()
}

fn matching<'a>(
    records: &'a [PlayerRecord],
    filter: &CohortFilter<'_>,
    season: &str,
    restrict_competitions: bool,
) -> Vec<&'a PlayerRecord> {
    records
        .iter()
        .filter(|rec| rec.position == Some(filter.position))
        .filter(|rec| rec.season == season)
        .filter(|rec| {
            !restrict_competitions
                || filter.competitions.is_empty()
                || filter.competitions.iter().any(|c| c == &rec.competition)
        })
        .filter(|rec| match filter.min_minutes {
            Some(floor) => rec.minutes.is_some_and(|m| m >= floor),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pos: PositionGroup, season: &str, comp: &str, minutes: f64) -> PlayerRecord {
        PlayerRecord {
            player_name: format!("{comp} {season}"),
            season: season.to_string(),
            competition: comp.to_string(),
            position: Some(pos),
            minutes: Some(minutes),
            ..Default::default()
        }
    }

    #[test]
    fn repairs_only_equal_year_labels() {
        assert_eq!(repair_season_label("2025/2025").as_deref(), Some("2024/2025"));
        assert_eq!(repair_season_label("2024/2025"), None);
        assert_eq!(repair_season_label("2025"), None);
        assert_eq!(repair_season_label("24/24"), None);
    }

    #[test]
    fn malformed_season_retries_before_dropping_competitions() {
        let pos = PositionGroup::Midfield;
        let comps = vec!["Premier League".to_string()];
        let records = vec![
            rec(pos, "2024/2025", "Premier League", 900.0),
            rec(pos, "2024/2025", "Eredivisie", 900.0),
        ];
        let filter = CohortFilter {
            position: pos,
            season: "2025/2025",
            competitions: &comps,
            min_minutes: None,
        };
        let cohort = select_cohort(&records, &filter);
        assert_eq!(cohort.len(), 1);
        assert_eq!(cohort[0].competition, "Premier League");
    }

    #[test]
    fn competition_restriction_dropped_as_last_resort() {
        let pos = PositionGroup::Midfield;
        let comps = vec!["Premier League".to_string()];
        let records = vec![rec(pos, "2024/2025", "Superliga", 900.0)];
        let filter = CohortFilter {
            position: pos,
            season: "2024/2025",
            competitions: &comps,
            min_minutes: None,
        };
        let cohort = select_cohort(&records, &filter);
        assert_eq!(cohort.len(), 1);
    }

    #[test]
    fn exhausted_cascade_yields_empty() {
        let comps: Vec<String> = Vec::new();
        let filter = CohortFilter {
            position: PositionGroup::Goalkeeper,
            season: "2024/2025",
            competitions: &comps,
            min_minutes: Some(600.0),
        };
        let records = vec![rec(PositionGroup::Midfield, "2024/2025", "Serie A", 900.0)];
        assert!(select_cohort(&records, &filter).is_empty());
    }

    #[test]
    fn minutes_floor_applies_at_every_step() {
        let pos = PositionGroup::FullBack;
        let comps = vec!["La Liga".to_string()];
        let records = vec![
            rec(pos, "2024/2025", "La Liga", 300.0),
            rec(pos, "2024/2025", "Superliga", 1200.0),
        ];
        let filter = CohortFilter {
            position: pos,
            season: "2024/2025",
            competitions: &comps,
            min_minutes: Some(600.0),
        };
        // The La Liga row misses the floor, so the cascade falls through to
        // the unrestricted step and picks up the Superliga row.
        let cohort = select_cohort(&records, &filter);
        assert_eq!(cohort.len(), 1);
        assert_eq!(cohort[0].competition, "Superliga");
    }
}
