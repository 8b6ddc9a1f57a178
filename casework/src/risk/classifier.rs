//! Risk classification for case deadlines.
//!
//! Turns one case's deadline and milestone state into a level plus
//! human-readable reasons. Pure: the caller supplies every input including
//! `now`, and nothing is logged or stored here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;
use crate::model::{Milestone, MilestoneType};
use crate::risk::RiskLevel;

/// Everything the classifier looks at for one case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskInput {
    /// Days until the effective due date; negative when overdue
    pub days_remaining: i64,
    /// The effective due date has passed
    pub is_overdue: bool,
    /// The deadline clock is paused
    pub is_paused: bool,
    /// An extension notice to the data subject is still owed
    pub extension_pending: bool,
    /// The case is closed
    pub is_closed: bool,
    /// The case's milestones, fully materialized by the driver
    pub milestones: Vec<Milestone>,
    /// Reference instant for milestone lateness
    pub now: DateTime<Utc>,
}

/// Classification result: level plus reasons in the order the checks fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub reasons: Vec<String>,
}

impl RiskAssessment {
    fn green(reason: &str) -> Self {
        Self {
            level: RiskLevel::Green,
            reasons: vec![reason.to_string()],
        }
    }
}

/// Derives a risk level and reasons from one case's deadline state.
///
/// Closed and paused cases short-circuit to GREEN. Otherwise an ordered
/// sequence of independent checks runs; each can contribute a reason and a
/// floor level, and the final level is the maximum contributed. Reasons
/// accumulate in check order and are never deduplicated, so the level can
/// only escalate within one evaluation.
pub struct RiskClassifier;

impl RiskClassifier {
    /// Classify one case
    pub fn compute_risk(input: &RiskInput, config: &RiskConfig) -> RiskAssessment {
        if input.is_closed {
            return RiskAssessment::green("Case is closed");
        }
        if input.is_paused {
            return RiskAssessment::green("Clock is paused");
        }

        let checks = [
            Self::deadline_check(input, config),
            Self::milestone_check(input),
            Self::extension_notice_check(input),
        ];
        let fired: Vec<(RiskLevel, String)> = checks.into_iter().flatten().collect();

        if fired.is_empty() {
            return RiskAssessment::green("On track");
        }

        let level = fired
            .iter()
            .map(|(level, _)| *level)
            .max()
            .unwrap_or(RiskLevel::Green);
        let reasons = fired.into_iter().map(|(_, reason)| reason).collect();
        RiskAssessment { level, reasons }
    }

    /// Overdue beats the threshold messages; thresholds are inclusive
    fn deadline_check(input: &RiskInput, config: &RiskConfig) -> Option<(RiskLevel, String)> {
        if input.is_overdue {
            Some((RiskLevel::Red, "Legal deadline overdue".to_string()))
        } else if input.days_remaining <= config.red_threshold_days {
            Some((
                RiskLevel::Red,
                format!(
                    "{} day(s) remaining until legal deadline",
                    input.days_remaining
                ),
            ))
        } else if input.days_remaining <= config.yellow_threshold_days {
            Some((
                RiskLevel::Yellow,
                format!(
                    "{} day(s) remaining until legal deadline",
                    input.days_remaining
                ),
            ))
        } else {
            None
        }
    }

    /// One late milestone warns; more than one alarms
    fn milestone_check(input: &RiskInput) -> Option<(RiskLevel, String)> {
        let overdue: Vec<MilestoneType> = input
            .milestones
            .iter()
            .filter(|m| m.is_overdue(input.now))
            .map(|m| m.milestone_type)
            .collect();

        match overdue.as_slice() {
            [] => None,
            [only] => Some((RiskLevel::Yellow, format!("Milestone overdue: {}", only))),
            many => {
                let names: Vec<String> = many.iter().map(|t| t.to_string()).collect();
                Some((
                    RiskLevel::Red,
                    format!("{} milestones overdue: {}", many.len(), names.join(", ")),
                ))
            }
        }
    }

    fn extension_notice_check(input: &RiskInput) -> Option<(RiskLevel, String)> {
        if input.extension_pending {
            Some((
                RiskLevel::Yellow,
                "Extension notification pending".to_string(),
            ))
        } else {
            None
        }
    }
}
