//! Flat views of engine values for printing.

use chrono::NaiveDate;
use hito_core::calendar::{Period, format_date, format_time};
use hito_core::entities::{AuditRecord, CompletionRecord, MilestoneTemplate};
use hito_core::enums::{DisplayStatus, MilestoneKind};
use hito_engine::outcome::{BatchOutcome, BatchSummary};
use hito_engine::row::CalendarRow;
use serde::Serialize;

use crate::output::TableRow;

/// One calendar line as shown by `hitos list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarLine {
    pub id: u64,
    pub process: String,
    pub milestone: String,
    pub deadline_date: String,
    pub deadline_time: Option<String>,
    pub status: DisplayStatus,
    pub kind: MilestoneKind,
    pub critical: bool,
}

impl CalendarLine {
    pub fn from_row(row: &CalendarRow, today: NaiveDate) -> Self {
        Self {
            id: row.id(),
            process: row.process_name.clone(),
            milestone: row.milestone_name.clone(),
            deadline_date: format_date(row.instance.deadline_date),
            deadline_time: row.instance.deadline_time.map(format_time),
            status: row.display_status(today),
            kind: row.instance.kind,
            critical: row.instance.critical,
        }
    }
}

impl TableRow for CalendarLine {
    const HEADERS: &'static [&'static str] = &[
        "id", "process", "milestone", "deadline", "time", "status", "kind", "critical",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.process.clone(),
            self.milestone.clone(),
            self.deadline_date.clone(),
            self.deadline_time.clone().unwrap_or_else(|| "-".into()),
            self.status.to_string(),
            self.kind.to_string(),
            if self.critical { "yes" } else { "" }.to_string(),
        ]
    }
}

/// A page of calendar lines with its position.
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub period: Period,
    /// One-based page number.
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    pub items: Vec<CalendarLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: DisplayStatus,
    pub count: usize,
}

impl TableRow for StatusCount {
    const HEADERS: &'static [&'static str] = &["status", "count"];

    fn cells(&self) -> Vec<String> {
        vec![self.status.to_string(), self.count.to_string()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodLine {
    pub period: Period,
    pub processes: usize,
}

impl TableRow for PeriodLine {
    const HEADERS: &'static [&'static str] = &["period", "processes"];

    fn cells(&self) -> Vec<String> {
        vec![self.period.to_string(), self.processes.to_string()]
    }
}

impl TableRow for MilestoneTemplate {
    const HEADERS: &'static [&'static str] =
        &["id", "name", "every", "valid from", "valid until", "mandatory"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format!("{} {}", self.frequency, self.periodicity),
            format_date(self.valid_from),
            self.valid_until.map_or_else(|| "-".into(), format_date),
            if self.mandatory { "yes" } else { "" }.to_string(),
        ]
    }
}

impl TableRow for CompletionRecord {
    const HEADERS: &'static [&'static str] = &["date", "time", "evidence"];

    fn cells(&self) -> Vec<String> {
        vec![
            format_date(self.date),
            self.time
                .map_or_else(|| "-".into(), |t| t.format("%H:%M:%S").to_string()),
            self.evidence.clone().unwrap_or_default(),
        ]
    }
}

impl TableRow for AuditRecord {
    const HEADERS: &'static [&'static str] = &[
        "id", "recorded", "user", "instance", "milestone", "field", "previous", "new", "reason",
        "note",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.map_or_else(|| "-".into(), |id| id.to_string()),
            self.recorded_at.format("%Y-%m-%d %H:%M").to_string(),
            self.username.clone(),
            self.instance_id.to_string(),
            self.milestone_name.clone(),
            self.field.to_string(),
            self.previous_value.clone().unwrap_or_else(|| "-".into()),
            self.new_value.clone().unwrap_or_else(|| "-".into()),
            self.reason.label().to_string(),
            self.note.clone().unwrap_or_default(),
        ]
    }
}

/// Counts of a batch, without the audit record bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeView {
    pub result: &'static str,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub audit_records: usize,
    pub audit_failures: usize,
    pub errors: Vec<String>,
}

impl From<&BatchOutcome> for OutcomeView {
    fn from(outcome: &BatchOutcome) -> Self {
        Self {
            result: match outcome.summary() {
                BatchSummary::Success => "success",
                BatchSummary::Partial { .. } => "partial",
                BatchSummary::Failure => "failure",
            },
            attempted: outcome.attempted,
            succeeded: outcome.succeeded,
            failed: outcome.failures.len(),
            audit_records: outcome.audit_records.len(),
            audit_failures: outcome.audit_failures,
            errors: outcome.failures.iter().map(|f| f.error.clone()).collect(),
        }
    }
}
