//! Aggregated result of a continue-on-error batch.

use hito_core::entities::{AuditRecord, InstanceId, MilestoneTemplateId};
use serde::Serialize;

/// What a failed batch item addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum BatchTarget {
    Instance(InstanceId),
    Template(MilestoneTemplateId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub target: BatchTarget,
    pub error: String,
}

/// Overall verdict of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BatchSummary {
    Success,
    Partial { failed: usize },
    Failure,
}

/// Per-item results of a commit or cascade.
///
/// Audit-write failures never count against `succeeded`; the mutation they
/// describe has already been persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<ItemFailure>,
    pub audit_records: Vec<AuditRecord>,
    pub audit_failures: usize,
}

impl BatchOutcome {
    pub(crate) fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    pub(crate) fn record_failure(&mut self, target: BatchTarget, error: impl ToString) {
        self.attempted += 1;
        self.failures.push(ItemFailure {
            target,
            error: error.to_string(),
        });
    }

    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        if self.failures.is_empty() {
            BatchSummary::Success
        } else if self.succeeded == 0 {
            BatchSummary::Failure
        } else {
            BatchSummary::Partial {
                failed: self.failures.len(),
            }
        }
    }
}
