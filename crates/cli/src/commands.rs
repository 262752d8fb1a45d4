//! CLI commands

use signoff_core::{BusinessDate, DirectoryError, EventLedger, Report, ReportDirectory, SignOffEvent, SignOffForm};
use signoff_engine::SignOffState;
use signoff_store::JsonReportDirectory;

use crate::config::AppConfig;
use crate::context::AppContext;

/// Record a sign-off at the requested level
pub fn sign(ctx: &AppContext, form: SignOffForm, identity: &str) -> Result<SignOffEvent, anyhow::Error> {
    let event = ctx.engine.sign_off_form(form, identity)?;

    println!(
        "✅ {} level sign-off of {} ({}/{}) for {} by {} [{}]",
        event.level,
        event.report_id,
        event.dataset_id,
        event.data_source_id,
        event.business_date,
        event.created_by,
        event.id
    );
    Ok(event)
}

/// Show where a report stands for a business date
pub fn status(ctx: &AppContext, report_id: &str, business_date: BusinessDate) -> Result<SignOffState, anyhow::Error> {
    let state = ctx.engine.status(report_id, business_date)?;

    println!("Sign-off status for {} on {}: {}", report_id, business_date, state.as_str());
    if let Some(first) = state.first_level() {
        println!("   FIRST  by {} at {}", first.created_by, first.created_at.to_rfc3339());
    }
    if let Some(second) = state.second_level() {
        println!("   SECOND by {} at {}", second.created_by, second.created_at.to_rfc3339());
    }
    if state.is_finalized() {
        println!("✅ Finalized");
    }

    Ok(state)
}

/// List every recorded sign-off for a report
pub fn history(ctx: &AppContext, report_id: &str) -> Result<Vec<SignOffEvent>, anyhow::Error> {
    let events = ctx.engine.ledger().events_for_report(report_id)?;

    if events.is_empty() {
        println!("No sign-offs recorded for {}", report_id);
        return Ok(events);
    }

    println!("{:<36} {:<11} {:<7} {:<20} {:<16} {}", "ID", "DATE", "LEVEL", "DATASET", "SOURCE", "BY");
    for e in &events {
        println!(
            "{:<36} {:<11} {:<7} {:<20} {:<16} {}",
            e.id, e.business_date, e.level, e.dataset_id, e.data_source_id, e.created_by
        );
    }

    Ok(events)
}

/// List known reports and their reviewers
pub fn reports(ctx: &AppContext) -> Result<Vec<Report>, anyhow::Error> {
    let reports = ctx.engine.directory().list_reports()?;

    if reports.is_empty() {
        println!("No reports in {}", ctx.reports_path().display());
    }
    for report in &reports {
        let name = report.name.as_deref().unwrap_or("-");
        println!("{} ({}): {}", report.id, name, report.first_level_reviewers.join(", "));
    }

    Ok(reports)
}

/// Add a reviewer to a report, creating the report if needed
///
/// Edits the report file directly; it does not go through the engine.
pub fn grant(
    config: &AppConfig,
    report_id: &str,
    identity: &str,
    name: Option<&str>,
) -> Result<Report, anyhow::Error> {
    let identity = identity.trim();
    if identity.is_empty() {
        anyhow::bail!("Reviewer identity cannot be empty");
    }

    let mut directory = JsonReportDirectory::load(config.reports_path())?;
    let mut report = match directory.get_report(report_id) {
        Ok(report) => report,
        Err(DirectoryError::ReportNotFound(_)) => Report::new(report_id),
        Err(e) => return Err(e.into()),
    };

    if let Some(name) = name {
        report.name = Some(name.to_string());
    }
    let report = report.with_reviewer(identity);
    directory.upsert(report.clone())?;

    println!("✅ {} may sign off {}", identity, report_id);
    Ok(report)
}
