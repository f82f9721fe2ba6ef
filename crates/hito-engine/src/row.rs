//! A milestone instance joined with what the calendar needs to display it.

use chrono::{NaiveDate, NaiveDateTime};
use hito_core::entities::{ClientId, InstanceId, MilestoneInstance};
use hito_core::enums::DisplayStatus;
use serde::Serialize;

use crate::audit::AuditContext;

/// One line of the calendar: the instance, its resolved names and the
/// timestamp of its most recent completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarRow {
    pub instance: MilestoneInstance,
    pub client_id: ClientId,
    pub process_name: String,
    pub milestone_name: String,
    pub last_completion: Option<NaiveDateTime>,
}

impl CalendarRow {
    #[must_use]
    pub const fn id(&self) -> InstanceId {
        self.instance.id
    }

    /// Compliance category, recomputed on every call.
    #[must_use]
    pub fn display_status(&self, today: NaiveDate) -> DisplayStatus {
        self.instance.display_status(self.last_completion, today)
    }

    #[must_use]
    pub fn audit_context(&self) -> AuditContext {
        AuditContext {
            client_id: self.client_id,
            instance_id: self.instance.id,
            milestone_template_id: self.instance.milestone_template_id,
            process_name: self.process_name.clone(),
            milestone_name: self.milestone_name.clone(),
        }
    }
}
