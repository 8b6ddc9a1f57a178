//! Offline risk preview for DSAR case deadlines.
//!
//! Recomputes the effective due date, days remaining, risk level and the
//! escalation a reconciliation run would emit for one case snapshot, without
//! touching any store. Useful for support and for debugging tenant SLA
//! configs.
//!
//! # Usage
//!
//! ```bash
//! casework --config tenant.toml --snapshot case.json
//! casework --config tenant.toml --snapshot case.json --now 2026-02-10T00:00:00Z
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;

use casework::{
    assess_case, CaseSnapshot, DeadlineCalculator, EscalationCoordinator, SlaConfig,
};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the tenant SLA config (TOML)
    #[arg(long)]
    config: PathBuf,

    /// Path to the case snapshot (JSON: case, deadline, milestones)
    #[arg(long)]
    snapshot: PathBuf,

    /// Evaluate as of this instant (RFC 3339) instead of the current time
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();

    let config = SlaConfig::from_path(&args.config)
        .with_context(|| format!("loading SLA config from {}", args.config.display()))?;
    let raw = std::fs::read_to_string(&args.snapshot)
        .with_context(|| format!("reading case snapshot from {}", args.snapshot.display()))?;
    let snapshot = CaseSnapshot::from_json_str(&raw).context("parsing case snapshot")?;
    let now = args.now.unwrap_or_else(Utc::now);

    let calculator = DeadlineCalculator::new(config);
    let assessed = assess_case(
        &snapshot.case,
        &snapshot.deadline,
        &snapshot.milestones,
        &calculator,
        now,
    );
    let previous = snapshot.deadline.current_risk;

    println!("case {}  status {}", snapshot.case.id, snapshot.case.status);
    println!("  as of           {}", now.to_rfc3339());
    println!(
        "  legal due       {}",
        snapshot.deadline.legal_due_at.to_rfc3339()
    );
    println!("  effective due   {}", assessed.effective_due_at.to_rfc3339());
    if snapshot.deadline.is_paused() {
        println!("  days remaining  {} (clock paused)", assessed.days_remaining);
    } else {
        println!("  days remaining  {}", assessed.days_remaining);
    }
    println!("  risk            {} (stored {})", assessed.risk.level, previous);
    for reason in &assessed.risk.reasons {
        println!("    - {reason}");
    }

    if EscalationCoordinator::should_escalate(previous, assessed.risk.level) {
        let escalation = EscalationCoordinator::build_escalation(
            snapshot.case.id,
            assessed.risk.level,
            assessed.is_overdue,
            &assessed.risk.reasons,
            &calculator.config().routing,
            now,
        );
        let roles: Vec<String> = escalation
            .recipient_roles
            .iter()
            .map(|role| role.to_string())
            .collect();
        println!(
            "  would escalate  {} -> {}",
            escalation.severity,
            roles.join(", ")
        );
    } else {
        println!("  would escalate  no");
    }

    Ok(())
}
