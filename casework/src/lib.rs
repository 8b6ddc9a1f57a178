//! Case lifecycle and SLA deadline engine for GDPR data subject access
//! requests.
//!
//! Four pure components cover the legally sensitive core of DSAR handling:
//!
//! - [`lifecycle::CaseStateMachine`]: the single authority on case status
//!   transitions
//! - [`deadline::DeadlineCalculator`]: legal and effective due dates in
//!   calendar or business days, extensions and paused clocks
//! - [`risk::RiskClassifier`]: GREEN/YELLOW/RED with human-readable reasons
//! - [`escalation::EscalationCoordinator`]: level-change escalation,
//!   severity mapping and recipient routing
//!
//! [`reconcile::reconcile_case`] composes them into the per-case step a
//! periodic scheduler runs; persistence, notification delivery and role
//! resolution stay behind traits. Nothing here reads the clock or performs
//! I/O on its own: callers supply `now` and all records.

pub mod config;
pub mod deadline;
pub mod error;
pub mod escalation;
pub mod lifecycle;
pub mod model;
pub mod reconcile;
pub mod risk;

pub use config::{MilestoneOffsets, RiskConfig, SlaConfig};
pub use deadline::{DeadlineCalculator, HolidayCalendar};
pub use error::{CaseworkError, CaseworkResult};
pub use escalation::{EscalationCoordinator, EscalationNotice, EscalationRouting};
pub use lifecycle::{CaseStateMachine, CaseStatus};
pub use model::{
    Case, CaseDeadline, CaseSnapshot, Escalation, EscalationSeverity, Milestone, MilestoneType,
    RecipientRole,
};
pub use reconcile::{
    assess_case, reconcile_case, CaseAssessment, EscalationSink, NotificationSink, RecordOutcome,
    ReconcileOutcome, RoleDirectory,
};
pub use risk::{RiskAssessment, RiskClassifier, RiskInput, RiskLevel};
