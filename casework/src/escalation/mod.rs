//! Escalation policy: level-change detection, severity mapping and
//! recipient routing.

pub mod coordinator;
pub mod routing;

pub use coordinator::{EscalationCoordinator, EscalationNotice};
pub use routing::EscalationRouting;
