use serde::{Deserialize, Serialize};

/// Canonical position groups. The physical and technical datasets spell these
/// differently ("Midfield" vs "Midfielder", "Wide Attacker" vs "Winger",
/// "Center Forward" vs "Striker"); everything downstream keys off this enum
/// and the raw labels are only seen at ingest and display time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionGroup {
    Goalkeeper,
    CentralDefender,
    FullBack,
    Midfield,
    WideAttacker,
    CenterForward,
}

pub const ALL_POSITIONS: [PositionGroup; 6] = [
    PositionGroup::Goalkeeper,
    PositionGroup::CentralDefender,
    PositionGroup::FullBack,
    PositionGroup::Midfield,
    PositionGroup::WideAttacker,
    PositionGroup::CenterForward,
];

impl PositionGroup {
    /// Parse a raw position label from either dataset scheme.
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().to_lowercase();
        if s.is_empty() {
            return None;
        }
        if s.contains("goalkeeper") || s.contains("keeper") || s == "gk" {
            return Some(Self::Goalkeeper);
        }
        if s.contains("central defender") || s.contains("centre back") || s.contains("center back") {
            return Some(Self::CentralDefender);
        }
        if s.contains("full back") || s.contains("fullback") || s.contains("wing back") {
            return Some(Self::FullBack);
        }
        // "Midfield" (physical) and "Midfielder" (technical).
        if s.contains("midfield") {
            return Some(Self::Midfield);
        }
        if s.contains("wide attacker") || s.contains("winger") || s.contains("wide midfielder") {
            return Some(Self::WideAttacker);
        }
        if s.contains("center forward") || s.contains("centre forward") || s.contains("striker") {
            return Some(Self::CenterForward);
        }
        None
    }

    /// Label as spelled in the physical (tracking) dataset.
    pub fn physical_label(self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goalkeeper",
            Self::CentralDefender => "Central Defender",
            Self::FullBack => "Full Back",
            Self::Midfield => "Midfield",
            Self::WideAttacker => "Wide Attacker",
            Self::CenterForward => "Center Forward",
        }
    }

    /// Label as spelled in the technical (event) dataset.
    pub fn technical_label(self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goalkeeper",
            Self::CentralDefender => "Central Defender",
            Self::FullBack => "Full Back",
            Self::Midfield => "Midfielder",
            Self::WideAttacker => "Winger",
            Self::CenterForward => "Striker",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_label_schemes() {
        assert_eq!(PositionGroup::parse("Midfield"), Some(PositionGroup::Midfield));
        assert_eq!(PositionGroup::parse("Midfielder"), Some(PositionGroup::Midfield));
        assert_eq!(PositionGroup::parse("Wide Attacker"), Some(PositionGroup::WideAttacker));
        assert_eq!(PositionGroup::parse("Winger"), Some(PositionGroup::WideAttacker));
        assert_eq!(PositionGroup::parse("Center Forward"), Some(PositionGroup::CenterForward));
        assert_eq!(PositionGroup::parse("Striker"), Some(PositionGroup::CenterForward));
        assert_eq!(PositionGroup::parse(" goalkeeper "), Some(PositionGroup::Goalkeeper));
        assert_eq!(PositionGroup::parse("Libero"), None);
    }
}
