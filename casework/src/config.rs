//! Per-tenant SLA configuration: response windows, risk thresholds,
//! milestone offsets and escalation routing.
//!
//! Loaded from TOML with defaults for every omitted field, then validated.
//! The defaults encode the statutory Art. 12 values: a 30-day window,
//! extendable by up to 60 more days.

use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CaseworkError, CaseworkResult};
use crate::escalation::EscalationRouting;
use crate::model::{Milestone, MilestoneType};

/// SLA configuration for one tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaConfig {
    /// Statutory response window in days
    pub initial_deadline_days: i64,

    /// Cap on cumulative extension days
    pub extension_max_days: i64,

    /// Count windows in business days instead of calendar days
    pub use_business_days: bool,

    /// IANA timezone name, carried for collaborators that render local dates
    pub timezone: String,

    /// Days remaining at or below which risk turns YELLOW
    pub yellow_threshold_days: i64,

    /// Days remaining at or below which risk turns RED
    pub red_threshold_days: i64,

    /// Planned milestone positions relative to intake
    pub milestone_offsets: MilestoneOffsets,

    /// Recipient roles per escalation severity
    pub routing: EscalationRouting,

    /// Tenant public holidays, excluded in business-day mode
    pub holidays: Vec<NaiveDate>,
}

impl Default for SlaConfig {
    fn default() -> Self {
        Self {
            initial_deadline_days: 30,
            extension_max_days: 60,
            use_business_days: false,
            timezone: "UTC".to_string(),
            yellow_threshold_days: 14,
            red_threshold_days: 7,
            milestone_offsets: MilestoneOffsets::default(),
            routing: EscalationRouting::default(),
            holidays: Vec::new(),
        }
    }
}

impl SlaConfig {
    /// Parse and validate a TOML document; omitted fields take defaults
    pub fn from_toml_str(raw: &str) -> CaseworkResult<Self> {
        let config: SlaConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a tenant config file
    pub fn from_path(path: &Path) -> CaseworkResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        debug!(path = %path.display(), "SLA config loaded");
        Ok(config)
    }

    /// Check that windows and thresholds are coherent
    pub fn validate(&self) -> CaseworkResult<()> {
        if self.initial_deadline_days <= 0 {
            return Err(CaseworkError::config(format!(
                "initial_deadline_days must be positive, got {}",
                self.initial_deadline_days
            )));
        }
        if self.extension_max_days < 0 {
            return Err(CaseworkError::config(format!(
                "extension_max_days must not be negative, got {}",
                self.extension_max_days
            )));
        }
        if self.red_threshold_days > self.yellow_threshold_days {
            return Err(CaseworkError::config(format!(
                "red_threshold_days ({}) must not exceed yellow_threshold_days ({})",
                self.red_threshold_days, self.yellow_threshold_days
            )));
        }
        Ok(())
    }

    /// The classifier's view of this config
    pub fn risk_config(&self) -> RiskConfig {
        RiskConfig {
            yellow_threshold_days: self.yellow_threshold_days,
            red_threshold_days: self.red_threshold_days,
        }
    }

    /// Planned milestones for a case received at `received_at`, one per
    /// milestone type at its configured calendar-day offset
    pub fn milestone_schedule(&self, case_id: Uuid, received_at: DateTime<Utc>) -> Vec<Milestone> {
        MilestoneType::all()
            .iter()
            .map(|&milestone_type| {
                let offset = self.milestone_offsets.offset_for(milestone_type);
                Milestone::new(case_id, milestone_type, received_at + Duration::days(offset))
            })
            .collect()
    }
}

/// Planned milestone positions, in days after intake
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MilestoneOffsets {
    pub idv: i64,
    pub collection: i64,
    pub draft: i64,
    pub legal: i64,
}

impl Default for MilestoneOffsets {
    fn default() -> Self {
        Self {
            idv: 5,
            collection: 15,
            draft: 20,
            legal: 25,
        }
    }
}

impl MilestoneOffsets {
    /// Offset for one milestone type
    pub fn offset_for(&self, milestone_type: MilestoneType) -> i64 {
        match milestone_type {
            MilestoneType::Idv => self.idv,
            MilestoneType::Collection => self.collection,
            MilestoneType::Draft => self.draft,
            MilestoneType::Legal => self.legal,
        }
    }
}

/// Risk thresholds consumed by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub yellow_threshold_days: i64,
    pub red_threshold_days: i64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            yellow_threshold_days: 14,
            red_threshold_days: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipientRole;
    use chrono::TimeZone;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_defaults_encode_the_statutory_windows() {
        let config = SlaConfig::default();
        assert_eq!(config.initial_deadline_days, 30);
        assert_eq!(config.extension_max_days, 60);
        assert!(!config.use_business_days);
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.yellow_threshold_days, 14);
        assert_eq!(config.red_threshold_days, 7);
        assert!(config.holidays.is_empty());
    }

    #[test]
    fn test_empty_toml_is_the_default_config() {
        let config = SlaConfig::from_toml_str("").unwrap();
        assert_eq!(config, SlaConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults_for_the_rest() {
        let config = SlaConfig::from_toml_str(
            r#"
            initial_deadline_days = 45
            use_business_days = true
            holidays = ["2026-01-01", "2026-12-25"]
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_deadline_days, 45);
        assert!(config.use_business_days);
        assert_eq!(config.holidays.len(), 2);
        assert_eq!(config.extension_max_days, 60);
        assert_eq!(config.routing, EscalationRouting::default());
    }

    #[test]
    fn test_routing_and_offsets_parse_as_tables() {
        let config = SlaConfig::from_toml_str(
            r#"
            [milestone_offsets]
            idv = 3

            [routing]
            yellow_warning = ["dpo"]
            "#,
        )
        .unwrap();
        assert_eq!(config.milestone_offsets.idv, 3);
        assert_eq!(config.milestone_offsets.collection, 15);
        assert_eq!(config.routing.yellow_warning, vec![RecipientRole::Dpo]);
        assert_eq!(config.routing.red_alert.len(), 2);
    }

    #[test]
    fn test_unordered_thresholds_are_rejected() {
        let err = SlaConfig::from_toml_str(
            r#"
            yellow_threshold_days = 10
            red_threshold_days = 20
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CaseworkError::Config { .. }));
    }

    #[test]
    fn test_non_positive_window_is_rejected() {
        let err = SlaConfig::from_toml_str("initial_deadline_days = 0").unwrap_err();
        assert!(matches!(err, CaseworkError::Config { .. }));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = SlaConfig::from_toml_str("initial_deadline_days = []").unwrap_err();
        assert!(matches!(err, CaseworkError::Toml(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SlaConfig {
            use_business_days: true,
            timezone: "Europe/Berlin".to_string(),
            holidays: vec![NaiveDate::from_ymd_opt(2026, 10, 3).unwrap()],
            ..SlaConfig::default()
        };
        let raw = toml::to_string(&config).unwrap();
        let back = SlaConfig::from_toml_str(&raw).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_milestone_schedule_positions_all_four_types() {
        let case_id = Uuid::new_v4();
        let schedule = SlaConfig::default().milestone_schedule(case_id, ts(2026, 1, 1));

        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule[0].milestone_type, MilestoneType::Idv);
        assert_eq!(schedule[0].planned_due_at, ts(2026, 1, 6));
        assert_eq!(schedule[3].milestone_type, MilestoneType::Legal);
        assert_eq!(schedule[3].planned_due_at, ts(2026, 1, 26));
        assert!(schedule.iter().all(|m| m.case_id == case_id));
        assert!(schedule.iter().all(|m| m.completed_at.is_none()));
    }
}
