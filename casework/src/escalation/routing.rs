//! Severity-to-role routing for escalation notifications.

use serde::{Deserialize, Serialize};

use crate::model::{EscalationSeverity, RecipientRole};

/// Tenant-configurable recipient-role lists per escalation severity.
///
/// Defaults follow the compliance chain: warnings go to the DPO and the case
/// manager, alerts and breaches pull in the tenant admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationRouting {
    pub yellow_warning: Vec<RecipientRole>,
    pub red_alert: Vec<RecipientRole>,
    pub overdue_breach: Vec<RecipientRole>,
}

impl Default for EscalationRouting {
    fn default() -> Self {
        Self {
            yellow_warning: vec![RecipientRole::Dpo, RecipientRole::CaseManager],
            red_alert: vec![RecipientRole::TenantAdmin, RecipientRole::Dpo],
            overdue_breach: vec![RecipientRole::TenantAdmin, RecipientRole::Dpo],
        }
    }
}

impl EscalationRouting {
    /// Role list for one severity
    pub fn recipients_for(&self, severity: EscalationSeverity) -> &[RecipientRole] {
        match severity {
            EscalationSeverity::YellowWarning => &self.yellow_warning,
            EscalationSeverity::RedAlert => &self.red_alert,
            EscalationSeverity::OverdueBreach => &self.overdue_breach,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routing_matches_the_compliance_chain() {
        let routing = EscalationRouting::default();
        assert_eq!(
            routing.recipients_for(EscalationSeverity::YellowWarning),
            &[RecipientRole::Dpo, RecipientRole::CaseManager]
        );
        assert_eq!(
            routing.recipients_for(EscalationSeverity::RedAlert),
            &[RecipientRole::TenantAdmin, RecipientRole::Dpo]
        );
        assert_eq!(
            routing.recipients_for(EscalationSeverity::OverdueBreach),
            &[RecipientRole::TenantAdmin, RecipientRole::Dpo]
        );
    }

    #[test]
    fn test_tenants_can_override_one_severity() {
        let routing = EscalationRouting {
            red_alert: vec![RecipientRole::Dpo],
            ..EscalationRouting::default()
        };
        assert_eq!(
            routing.recipients_for(EscalationSeverity::RedAlert),
            &[RecipientRole::Dpo]
        );
        // untouched severities keep their defaults
        assert_eq!(
            routing.recipients_for(EscalationSeverity::YellowWarning),
            &[RecipientRole::Dpo, RecipientRole::CaseManager]
        );
    }
}
