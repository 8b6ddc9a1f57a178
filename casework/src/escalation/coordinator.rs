//! Escalation decisions: when to escalate, how severe, who hears about it.
//!
//! The coordinator itself is pure. It builds the records and notification
//! content; writing them happens through the sinks in [`crate::reconcile`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::escalation::EscalationRouting;
use crate::model::{Escalation, EscalationSeverity};
use crate::risk::RiskLevel;

/// Notification content for one escalation, fanned out per recipient user
#[derive(Debug, Clone, PartialEq)]
pub struct EscalationNotice {
    pub title: String,
    pub message: String,
    pub link_url: String,
}

/// Escalation policy over risk-level changes.
pub struct EscalationCoordinator;

impl EscalationCoordinator {
    /// Whether a level change warrants an escalation record.
    ///
    /// Any change away from the stored level escalates as long as the new
    /// level is not GREEN. An improvement such as RED to YELLOW therefore
    /// also escalates; only a move into GREEN, or an unchanged level, stays
    /// quiet.
    pub fn should_escalate(previous: RiskLevel, current: RiskLevel) -> bool {
        current != RiskLevel::Green && current != previous
    }

    /// Severity of the escalation a risk level produces
    pub fn severity_for(level: RiskLevel, is_overdue: bool) -> EscalationSeverity {
        if is_overdue {
            EscalationSeverity::OverdueBreach
        } else if level == RiskLevel::Red {
            EscalationSeverity::RedAlert
        } else {
            EscalationSeverity::YellowWarning
        }
    }

    /// Build the append-only escalation record for a level change
    pub fn build_escalation(
        case_id: Uuid,
        level: RiskLevel,
        is_overdue: bool,
        reasons: &[String],
        routing: &EscalationRouting,
        at: DateTime<Utc>,
    ) -> Escalation {
        let severity = Self::severity_for(level, is_overdue);
        Escalation {
            id: Uuid::new_v4(),
            case_id,
            severity,
            reason: reasons.join("; "),
            recipient_roles: routing.recipients_for(severity).to_vec(),
            created_at: at,
        }
    }

    /// Notification content for one escalation record
    pub fn build_notice(escalation: &Escalation) -> EscalationNotice {
        let title = match escalation.severity {
            EscalationSeverity::YellowWarning => "DSAR deadline warning",
            EscalationSeverity::RedAlert => "DSAR deadline at risk",
            EscalationSeverity::OverdueBreach => "DSAR deadline breached",
        };
        EscalationNotice {
            title: title.to_string(),
            message: format!("Case {}: {}", escalation.case_id, escalation.reason),
            link_url: format!("/cases/{}", escalation.case_id),
        }
    }
}
