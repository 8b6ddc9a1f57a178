//! Risk levels for case deadlines.

use serde::{Deserialize, Serialize};

/// Deadline risk level for a case.
///
/// Ordered by urgency (`Green < Yellow < Red`) so a set of rule hits can be
/// folded with `max` and the level can only ever escalate within one
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Green,
    Yellow,
    Red,
}

impl RiskLevel {
    /// All levels, least to most urgent
    pub fn all() -> &'static [RiskLevel] {
        &[RiskLevel::Green, RiskLevel::Yellow, RiskLevel::Red]
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Green => "green",
            RiskLevel::Yellow => "yellow",
            RiskLevel::Red => "red",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_escalates_green_to_red() {
        assert!(RiskLevel::Green < RiskLevel::Yellow);
        assert!(RiskLevel::Yellow < RiskLevel::Red);
        let worst = [RiskLevel::Yellow, RiskLevel::Red, RiskLevel::Green]
            .into_iter()
            .max();
        assert_eq!(worst, Some(RiskLevel::Red));
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&RiskLevel::Red).unwrap();
        assert_eq!(json, "\"red\"");
        let back: RiskLevel = serde_json::from_str("\"yellow\"").unwrap();
        assert_eq!(back, RiskLevel::Yellow);
    }
}
