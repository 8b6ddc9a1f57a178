//! Risk classification: level plus reasons from deadline and milestone state.

pub mod classifier;
pub mod level;

pub use classifier::{RiskAssessment, RiskClassifier, RiskInput};
pub use level::RiskLevel;
