//! Transition rules for the case lifecycle.
//!
//! The graph here is the single authority on which status changes are legal.
//! The case-transition handler must ask before persisting anything; nothing
//! else in the system encodes edges.

use crate::error::{CaseworkError, CaseworkResult};
use crate::lifecycle::CaseStatus;

/// Static transition table over [`CaseStatus`].
///
/// Pure and stateless: every query is answered from a fixed adjacency list,
/// so results are identical across processes and restarts. The graph is
/// directed and not symmetric; the one intentional loop is the legal-review
/// send-back to data collection.
pub struct CaseStateMachine;

impl CaseStateMachine {
    /// Allowed target states from `from`, in review order.
    ///
    /// Empty for [`CaseStatus::Closed`]: closed cases are immutable history.
    pub fn allowed_transitions(from: CaseStatus) -> &'static [CaseStatus] {
        match from {
            CaseStatus::New => &[
                CaseStatus::IdentityVerification,
                CaseStatus::IntakeTriage,
                CaseStatus::Rejected,
            ],
            CaseStatus::IdentityVerification => {
                &[CaseStatus::IntakeTriage, CaseStatus::Rejected]
            }
            CaseStatus::IntakeTriage => &[CaseStatus::DataCollection, CaseStatus::Rejected],
            CaseStatus::DataCollection => &[CaseStatus::ReviewLegal],
            CaseStatus::ReviewLegal => {
                &[CaseStatus::ResponsePreparation, CaseStatus::DataCollection]
            }
            CaseStatus::ResponsePreparation => &[CaseStatus::ResponseSent],
            CaseStatus::ResponseSent => &[CaseStatus::Closed],
            CaseStatus::Rejected => &[CaseStatus::Closed],
            CaseStatus::Closed => &[],
        }
    }

    /// Whether `from -> to` is an edge of the lifecycle graph
    pub fn is_valid_transition(from: CaseStatus, to: CaseStatus) -> bool {
        Self::allowed_transitions(from).contains(&to)
    }

    /// Gate a requested transition.
    ///
    /// Returns [`CaseworkError::InvalidTransition`] naming both states when
    /// the edge does not exist; the caller must leave the case unmodified.
    pub fn validate_transition(from: CaseStatus, to: CaseStatus) -> CaseworkResult<()> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(CaseworkError::invalid_transition(from, to))
        }
    }
}
