//! Core data shapes: cases, deadlines, milestones and escalations.
//!
//! These mirror what the persistence collaborator stores. The engine never
//! talks to a database itself; records are loaded by the driver, passed in,
//! and written back through the traits in [`crate::reconcile`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CaseworkResult;
use crate::lifecycle::CaseStatus;
use crate::risk::RiskLevel;

/// A data subject access request case.
///
/// Owned by the case-management subsystem; the engine only reads `status`.
/// Tenant and assignee travel along for routing and audit context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub status: CaseStatus,
    pub assignee_id: Option<Uuid>,
    /// When the request arrived; anchors the statutory response window
    pub received_at: DateTime<Utc>,
}

/// Deadline state for one case. Created once at intake, then only mutated.
///
/// `legal_due_at` is fixed at intake and never changes; extensions and pause
/// credits move the *effective* due date, which is recomputed on demand
/// rather than stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseDeadline {
    pub case_id: Uuid,

    /// Statutory response deadline, immutable once computed
    pub legal_due_at: DateTime<Utc>,

    /// Cumulative approved extension, in days
    pub extension_days: i64,

    /// Cumulative days the clock has spent paused
    pub total_paused_days: i64,

    /// Set while the clock is paused; freezes `days_remaining`
    pub paused_at: Option<DateTime<Utc>>,

    /// Risk level written back by the last reconciliation run
    pub current_risk: RiskLevel,

    /// Reasons accompanying `current_risk`, in the order the checks fired
    pub risk_reasons: Vec<String>,

    /// Days remaining as of the last reconciliation; frozen while paused
    pub days_remaining: i64,

    /// An Art. 12(3) extension notice to the data subject is still owed
    pub extension_notification_required: bool,

    /// When the last extension notice went out
    pub extension_notification_sent_at: Option<DateTime<Utc>>,
}

impl CaseDeadline {
    /// Whether the deadline clock is currently paused
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }
}

/// Kinds of sub-deadline tracked within a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneType {
    Idv,
    Collection,
    Draft,
    Legal,
}

impl MilestoneType {
    /// All milestone kinds, in case-progress order
    pub fn all() -> &'static [MilestoneType] {
        &[
            MilestoneType::Idv,
            MilestoneType::Collection,
            MilestoneType::Draft,
            MilestoneType::Legal,
        ]
    }
}

impl std::fmt::Display for MilestoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MilestoneType::Idv => "identity verification",
            MilestoneType::Collection => "data collection",
            MilestoneType::Draft => "draft response",
            MilestoneType::Legal => "legal review",
        };
        write!(f, "{}", s)
    }
}

/// A named sub-deadline within a case, used as an early-warning signal
/// distinct from the overall legal due date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub case_id: Uuid,
    pub milestone_type: MilestoneType,
    pub planned_due_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Milestone {
    /// A planned, not-yet-completed milestone
    pub fn new(
        case_id: Uuid,
        milestone_type: MilestoneType,
        planned_due_at: DateTime<Utc>,
    ) -> Self {
        Self {
            case_id,
            milestone_type,
            planned_due_at,
            completed_at: None,
        }
    }

    /// Mark the milestone done
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.completed_at = Some(at);
    }

    /// Incomplete and past its planned due date as of `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.completed_at.is_none() && self.planned_due_at < now
    }
}

/// Escalation severity, worst last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationSeverity {
    YellowWarning,
    RedAlert,
    OverdueBreach,
}

impl std::fmt::Display for EscalationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EscalationSeverity::YellowWarning => "yellow_warning",
            EscalationSeverity::RedAlert => "red_alert",
            EscalationSeverity::OverdueBreach => "overdue_breach",
        };
        write!(f, "{}", s)
    }
}

/// Roles that can receive escalation notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipientRole {
    Dpo,
    CaseManager,
    TenantAdmin,
}

impl std::fmt::Display for RecipientRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecipientRole::Dpo => "dpo",
            RecipientRole::CaseManager => "case_manager",
            RecipientRole::TenantAdmin => "tenant_admin",
        };
        write!(f, "{}", s)
    }
}

/// Append-only escalation audit record.
///
/// Written exactly once per risk-level change by the escalation coordinator,
/// never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Escalation {
    pub id: Uuid,
    pub case_id: Uuid,
    pub severity: EscalationSeverity,
    /// The risk reasons at escalation time, joined for display
    pub reason: String,
    pub recipient_roles: Vec<RecipientRole>,
    pub created_at: DateTime<Utc>,
}

/// One case's full deadline state, as consumed by the offline risk preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub case: Case,
    pub deadline: CaseDeadline,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

impl CaseSnapshot {
    /// Parse a snapshot from a JSON document
    pub fn from_json_str(raw: &str) -> CaseworkResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
