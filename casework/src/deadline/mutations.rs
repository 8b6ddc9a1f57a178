//! The only legal mutations of a [`CaseDeadline`]: intake creation,
//! extensions, clock pause/resume, and extension-notice bookkeeping.
//!
//! Everything else on the record is written back by reconciliation, never
//! edited in place.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::deadline::DeadlineCalculator;
use crate::error::{CaseworkError, CaseworkResult};
use crate::model::CaseDeadline;
use crate::risk::RiskLevel;

impl CaseDeadline {
    /// Build the deadline record at case intake.
    ///
    /// `legal_due_at` is fixed here from `received_at` plus the configured
    /// window and never changes afterwards. Counters start at zero, risk
    /// starts GREEN; the first reconciliation run fills in reasons.
    pub fn open(
        case_id: Uuid,
        received_at: DateTime<Utc>,
        calculator: &DeadlineCalculator,
    ) -> Self {
        let legal_due_at = calculator.legal_due_date(received_at);
        let days_remaining = calculator.days_remaining(legal_due_at, received_at);
        Self {
            case_id,
            legal_due_at,
            extension_days: 0,
            total_paused_days: 0,
            paused_at: None,
            current_risk: RiskLevel::Green,
            risk_reasons: Vec::new(),
            days_remaining,
            extension_notification_required: false,
            extension_notification_sent_at: None,
        }
    }

    /// Apply an approved extension after validating it against the cap.
    ///
    /// Also raises the Art. 12(3) notice flag: the data subject must be told
    /// about the extension, and risk stays elevated until
    /// [`CaseDeadline::mark_extension_notified`]. On rejection the record is
    /// left untouched.
    pub fn apply_extension(
        &mut self,
        requested_days: i64,
        calculator: &DeadlineCalculator,
    ) -> CaseworkResult<()> {
        DeadlineCalculator::validate_extension(
            requested_days,
            self.extension_days,
            calculator.config().extension_max_days,
        )?;
        self.extension_days += requested_days;
        self.extension_notification_required = true;
        Ok(())
    }

    /// Pause the deadline clock, freezing `days_remaining` until resumed
    pub fn pause(&mut self, at: DateTime<Utc>) -> CaseworkResult<()> {
        if let Some(paused_at) = self.paused_at {
            return Err(CaseworkError::AlreadyPaused {
                case_id: self.case_id,
                paused_at,
            });
        }
        self.paused_at = Some(at);
        Ok(())
    }

    /// Resume the clock, crediting the paused span to `total_paused_days`
    pub fn resume(
        &mut self,
        at: DateTime<Utc>,
        calculator: &DeadlineCalculator,
    ) -> CaseworkResult<()> {
        let paused_at = match self.paused_at {
            Some(paused_at) => paused_at,
            None => {
                return Err(CaseworkError::NotPaused {
                    case_id: self.case_id,
                })
            }
        };
        self.total_paused_days += calculator.paused_days(paused_at, Some(at), at);
        self.paused_at = None;
        Ok(())
    }

    /// Record that the extension notice reached the data subject
    pub fn mark_extension_notified(&mut self, at: DateTime<Utc>) {
        self.extension_notification_sent_at = Some(at);
        self.extension_notification_required = false;
    }
}
