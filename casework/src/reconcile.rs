//! The per-case reconciliation step a periodic scheduler runs.
//!
//! One call recomputes the effective due date and days remaining, classifies
//! risk, writes the result back onto the deadline record, and on a level
//! change emits one escalation plus per-recipient notifications through the
//! collaborator traits below. Batch orchestration, retries and per-case
//! failure isolation stay with the external scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::deadline::DeadlineCalculator;
use crate::error::CaseworkResult;
use crate::escalation::EscalationCoordinator;
use crate::lifecycle::CaseStatus;
use crate::model::{Case, CaseDeadline, Escalation, Milestone, RecipientRole};
use crate::risk::{RiskAssessment, RiskClassifier, RiskInput, RiskLevel};

// ── Collaborator boundaries ──────────────────────────────────────────────────

/// Whether an escalation write created a new row or hit an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOutcome {
    Inserted,
    Duplicate,
}

/// Append-only escalation store.
///
/// `record` must be idempotent per `(case id, risk level)`: when a row for
/// that pair already exists, implementations report [`RecordOutcome::Duplicate`]
/// instead of inserting again (unique-constraint semantics). That guard is
/// what keeps a re-run of the scheduler from double-escalating before the
/// stored level is written back.
pub trait EscalationSink {
    fn record(&mut self, escalation: &Escalation, level: RiskLevel)
        -> CaseworkResult<RecordOutcome>;
}

/// Outbound notification dispatch; delivery is asynchronous and out of scope
pub trait NotificationSink {
    fn send(
        &mut self,
        recipient_user_id: Uuid,
        title: &str,
        message: &str,
        link_url: &str,
    ) -> CaseworkResult<()>;
}

/// Resolves a recipient role to the tenant's user ids
pub trait RoleDirectory {
    fn users_in_role(&self, tenant_id: Uuid, role: RecipientRole) -> CaseworkResult<Vec<Uuid>>;
}

// ── Pipeline ─────────────────────────────────────────────────────────────────

/// Pure recomputation result for one case, before anything is written back
#[derive(Debug, Clone, Serialize)]
pub struct CaseAssessment {
    pub effective_due_at: DateTime<Utc>,
    /// Frozen at the stored value while the clock is paused
    pub days_remaining: i64,
    pub is_overdue: bool,
    pub risk: RiskAssessment,
}

/// What one reconciliation run did, for the driver to persist and log
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileOutcome {
    pub effective_due_at: DateTime<Utc>,
    pub days_remaining: i64,
    pub previous_risk: RiskLevel,
    pub risk: RiskAssessment,
    /// The escalation a level change produced, whether or not it was fresh
    pub escalation: Option<Escalation>,
    /// How the sink answered, when an escalation was attempted
    pub record_outcome: Option<RecordOutcome>,
    /// Users actually notified this run, in dispatch order
    pub notified_users: Vec<Uuid>,
}

/// Recompute one case without touching anything: effective due date, days
/// remaining (frozen while paused) and the risk assessment.
///
/// Shared by [`reconcile_case`] and the offline preview.
pub fn assess_case(
    case: &Case,
    deadline: &CaseDeadline,
    milestones: &[Milestone],
    calculator: &DeadlineCalculator,
    now: DateTime<Utc>,
) -> CaseAssessment {
    let effective_due_at = calculator.effective_due_date(
        deadline.legal_due_at,
        deadline.extension_days,
        deadline.total_paused_days,
    );

    let is_paused = deadline.is_paused();
    let days_remaining = if is_paused {
        deadline.days_remaining
    } else {
        calculator.days_remaining(effective_due_at, now)
    };
    let is_overdue = !is_paused && days_remaining < 0;

    let input = RiskInput {
        days_remaining,
        is_overdue,
        is_paused,
        extension_pending: deadline.extension_notification_required,
        is_closed: case.status == CaseStatus::Closed,
        milestones: milestones.to_vec(),
        now,
    };
    let risk = RiskClassifier::compute_risk(&input, &calculator.config().risk_config());

    CaseAssessment {
        effective_due_at,
        days_remaining,
        is_overdue,
        risk,
    }
}

/// Run the reconciliation step for one case.
///
/// Updates `deadline` in place with the new risk level, reasons and days
/// remaining. When the level changed to a non-GREEN value, builds the
/// escalation record, persists it through `escalations`, and on a fresh
/// insert resolves recipient roles to users and dispatches one notification
/// per user. A duplicate insert skips the notifications entirely.
#[allow(clippy::too_many_arguments)]
pub fn reconcile_case(
    case: &Case,
    deadline: &mut CaseDeadline,
    milestones: &[Milestone],
    calculator: &DeadlineCalculator,
    now: DateTime<Utc>,
    escalations: &mut dyn EscalationSink,
    notifications: &mut dyn NotificationSink,
    directory: &dyn RoleDirectory,
) -> CaseworkResult<ReconcileOutcome> {
    let assessed = assess_case(case, deadline, milestones, calculator, now);

    let previous_risk = deadline.current_risk;
    deadline.current_risk = assessed.risk.level;
    deadline.risk_reasons = assessed.risk.reasons.clone();
    deadline.days_remaining = assessed.days_remaining;

    debug!(
        case_id = %case.id,
        previous = %previous_risk,
        current = %assessed.risk.level,
        days_remaining = assessed.days_remaining,
        "Case risk recomputed"
    );

    let mut escalation = None;
    let mut record_outcome = None;
    let mut notified_users = Vec::new();

    if EscalationCoordinator::should_escalate(previous_risk, assessed.risk.level) {
        let record = EscalationCoordinator::build_escalation(
            case.id,
            assessed.risk.level,
            assessed.is_overdue,
            &assessed.risk.reasons,
            &calculator.config().routing,
            now,
        );

        match escalations.record(&record, assessed.risk.level)? {
            RecordOutcome::Inserted => {
                let notice = EscalationCoordinator::build_notice(&record);
                for role in &record.recipient_roles {
                    for user_id in directory.users_in_role(case.tenant_id, *role)? {
                        // a user holding two recipient roles is notified once
                        if notified_users.contains(&user_id) {
                            continue;
                        }
                        notifications.send(
                            user_id,
                            &notice.title,
                            &notice.message,
                            &notice.link_url,
                        )?;
                        notified_users.push(user_id);
                    }
                }
                info!(
                    case_id = %case.id,
                    severity = %record.severity,
                    recipients = notified_users.len(),
                    "Escalation recorded"
                );
                record_outcome = Some(RecordOutcome::Inserted);
            }
            RecordOutcome::Duplicate => {
                debug!(
                    case_id = %case.id,
                    severity = %record.severity,
                    "Escalation already recorded, notifications skipped"
                );
                record_outcome = Some(RecordOutcome::Duplicate);
            }
        }
        escalation = Some(record);
    }

    Ok(ReconcileOutcome {
        effective_due_at: assessed.effective_due_at,
        days_remaining: assessed.days_remaining,
        previous_risk,
        risk: assessed.risk,
        escalation,
        record_outcome,
        notified_users,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlaConfig;
    use chrono::TimeZone;
    use std::collections::{HashMap, HashSet};

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[derive(Default)]
    struct MemorySink {
        records: Vec<Escalation>,
        seen: HashSet<(Uuid, RiskLevel)>,
    }

    impl EscalationSink for MemorySink {
        fn record(
            &mut self,
            escalation: &Escalation,
            level: RiskLevel,
        ) -> CaseworkResult<RecordOutcome> {
            if !self.seen.insert((escalation.case_id, level)) {
                return Ok(RecordOutcome::Duplicate);
            }
            self.records.push(escalation.clone());
            Ok(RecordOutcome::Inserted)
        }
    }

    #[derive(Default)]
    struct MemoryNotifier {
        sent: Vec<(Uuid, String)>,
    }

    impl NotificationSink for MemoryNotifier {
        fn send(
            &mut self,
            recipient_user_id: Uuid,
            title: &str,
            _message: &str,
            _link_url: &str,
        ) -> CaseworkResult<()> {
            self.sent.push((recipient_user_id, title.to_string()));
            Ok(())
        }
    }

    struct StaticDirectory {
        users: HashMap<RecipientRole, Vec<Uuid>>,
    }

    impl RoleDirectory for StaticDirectory {
        fn users_in_role(
            &self,
            _tenant_id: Uuid,
            role: RecipientRole,
        ) -> CaseworkResult<Vec<Uuid>> {
            Ok(self.users.get(&role).cloned().unwrap_or_default())
        }
    }

    fn directory_with(users: &[(RecipientRole, Uuid)]) -> StaticDirectory {
        let mut map: HashMap<RecipientRole, Vec<Uuid>> = HashMap::new();
        for (role, user) in users {
            map.entry(*role).or_default().push(*user);
        }
        StaticDirectory { users: map }
    }

    fn case_with_deadline(received: DateTime<Utc>) -> (Case, CaseDeadline, DeadlineCalculator) {
        let calculator = DeadlineCalculator::new(SlaConfig::default());
        let case = Case {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            status: CaseStatus::DataCollection,
            assignee_id: None,
            received_at: received,
        };
        let deadline = CaseDeadline::open(case.id, received, &calculator);
        (case, deadline, calculator)
    }

    #[test]
    fn test_same_level_recomputation_writes_no_escalation() {
        let (case, mut deadline, calculator) = case_with_deadline(ts(2026, 1, 1));
        let mut sink = MemorySink::default();
        let mut notifier = MemoryNotifier::default();
        let directory = directory_with(&[]);

        // twenty days out: still green, level unchanged
        let outcome = reconcile_case(
            &case,
            &mut deadline,
            &[],
            &calculator,
            ts(2026, 1, 11),
            &mut sink,
            &mut notifier,
            &directory,
        )
        .unwrap();

        assert_eq!(outcome.risk.level, RiskLevel::Green);
        assert!(outcome.escalation.is_none());
        assert!(sink.records.is_empty());
        assert!(notifier.sent.is_empty());
        assert_eq!(deadline.risk_reasons, vec!["On track".to_string()]);
    }

    #[test]
    fn test_paused_clock_freezes_days_remaining() {
        let (case, mut deadline, calculator) = case_with_deadline(ts(2026, 1, 1));
        deadline.days_remaining = 12;
        deadline.pause(ts(2026, 1, 19)).unwrap();

        let mut sink = MemorySink::default();
        let mut notifier = MemoryNotifier::default();
        let directory = directory_with(&[]);

        // far past the due date, but the clock is stopped
        let outcome = reconcile_case(
            &case,
            &mut deadline,
            &[],
            &calculator,
            ts(2026, 3, 1),
            &mut sink,
            &mut notifier,
            &directory,
        )
        .unwrap();

        assert_eq!(outcome.days_remaining, 12);
        assert_eq!(deadline.days_remaining, 12);
        assert_eq!(outcome.risk.level, RiskLevel::Green);
        assert_eq!(deadline.risk_reasons, vec!["Clock is paused".to_string()]);
    }

    #[test]
    fn test_closed_case_never_escalates_even_from_yellow() {
        let (mut case, mut deadline, calculator) = case_with_deadline(ts(2026, 1, 1));
        case.status = CaseStatus::Closed;
        deadline.current_risk = RiskLevel::Yellow;

        let mut sink = MemorySink::default();
        let mut notifier = MemoryNotifier::default();
        let directory = directory_with(&[]);

        let outcome = reconcile_case(
            &case,
            &mut deadline,
            &[],
            &calculator,
            ts(2026, 3, 1),
            &mut sink,
            &mut notifier,
            &directory,
        )
        .unwrap();

        assert_eq!(outcome.risk.level, RiskLevel::Green);
        assert_eq!(outcome.previous_risk, RiskLevel::Yellow);
        assert!(outcome.escalation.is_none());
        assert_eq!(deadline.current_risk, RiskLevel::Green);
    }

    #[test]
    fn test_level_change_records_and_notifies_once_per_user() {
        let (case, mut deadline, calculator) = case_with_deadline(ts(2026, 1, 1));
        let admin = Uuid::new_v4();
        let dpo = Uuid::new_v4();
        // the admin also holds the DPO role; they must be notified once
        let directory = directory_with(&[
            (RecipientRole::TenantAdmin, admin),
            (RecipientRole::Dpo, admin),
            (RecipientRole::Dpo, dpo),
        ]);
        let mut sink = MemorySink::default();
        let mut notifier = MemoryNotifier::default();

        // five days out: red alert
        let outcome = reconcile_case(
            &case,
            &mut deadline,
            &[],
            &calculator,
            ts(2026, 1, 26),
            &mut sink,
            &mut notifier,
            &directory,
        )
        .unwrap();

        assert_eq!(outcome.risk.level, RiskLevel::Red);
        assert_eq!(outcome.record_outcome, Some(RecordOutcome::Inserted));
        assert_eq!(sink.records.len(), 1);
        assert_eq!(outcome.notified_users, vec![admin, dpo]);
        assert_eq!(notifier.sent.len(), 2);
    }

    #[test]
    fn test_duplicate_insert_skips_notifications() {
        let (case, mut deadline, calculator) = case_with_deadline(ts(2026, 1, 1));
        let directory = directory_with(&[(RecipientRole::Dpo, Uuid::new_v4())]);
        let mut sink = MemorySink::default();
        let mut notifier = MemoryNotifier::default();

        let first = reconcile_case(
            &case,
            &mut deadline,
            &[],
            &calculator,
            ts(2026, 1, 26),
            &mut sink,
            &mut notifier,
            &directory,
        )
        .unwrap();
        assert_eq!(first.record_outcome, Some(RecordOutcome::Inserted));
        let sent_after_first = notifier.sent.len();

        // the driver re-runs before persisting the new level
        deadline.current_risk = RiskLevel::Green;
        let second = reconcile_case(
            &case,
            &mut deadline,
            &[],
            &calculator,
            ts(2026, 1, 26),
            &mut sink,
            &mut notifier,
            &directory,
        )
        .unwrap();

        assert_eq!(second.record_outcome, Some(RecordOutcome::Duplicate));
        assert!(second.notified_users.is_empty());
        assert_eq!(notifier.sent.len(), sent_after_first);
        assert_eq!(sink.records.len(), 1);
    }
}
