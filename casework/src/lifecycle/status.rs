//! The nine lifecycle states of a DSAR case.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a data subject access request case.
///
/// A case moves from intake through verification, triage and fulfilment to
/// [`CaseStatus::Closed`]. [`CaseStatus::Rejected`] is a resting state, not a
/// terminal one: rejected cases are still closed out explicitly for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Request received, nothing verified yet
    New,
    /// Awaiting proof that the requester is the data subject
    IdentityVerification,
    /// Scoping the request and checking for grounds to refuse
    IntakeTriage,
    /// Gathering the subject's data across systems
    DataCollection,
    /// Legal review of the collected material
    ReviewLegal,
    /// Drafting and assembling the response package
    ResponsePreparation,
    /// Response delivered to the data subject
    ResponseSent,
    /// Case completed and archived; no further transitions
    Closed,
    /// Request refused (unverifiable, manifestly unfounded, or excessive)
    Rejected,
}

impl CaseStatus {
    /// All lifecycle states, in intake-to-terminal order
    pub fn all() -> &'static [CaseStatus] {
        &[
            CaseStatus::New,
            CaseStatus::IdentityVerification,
            CaseStatus::IntakeTriage,
            CaseStatus::DataCollection,
            CaseStatus::ReviewLegal,
            CaseStatus::ResponsePreparation,
            CaseStatus::ResponseSent,
            CaseStatus::Closed,
            CaseStatus::Rejected,
        ]
    }

    /// Whether no transition leaves this state
    pub fn is_terminal(&self) -> bool {
        matches!(self, CaseStatus::Closed)
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CaseStatus::New => "new",
            CaseStatus::IdentityVerification => "identity_verification",
            CaseStatus::IntakeTriage => "intake_triage",
            CaseStatus::DataCollection => "data_collection",
            CaseStatus::ReviewLegal => "review_legal",
            CaseStatus::ResponsePreparation => "response_preparation",
            CaseStatus::ResponseSent => "response_sent",
            CaseStatus::Closed => "closed",
            CaseStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}
