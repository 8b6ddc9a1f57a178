//! Case lifecycle: the nine statuses and the transition graph between them.

pub mod machine;
pub mod status;

pub use machine::CaseStateMachine;
pub use status::CaseStatus;
