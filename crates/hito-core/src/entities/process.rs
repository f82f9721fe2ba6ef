use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ClientId, ClientProcessId, MilestoneTemplateId, ProcessTemplateId};
use crate::calendar::Period;
use crate::enums::PeriodicityUnit;

/// Reusable definition of a recurring workflow.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProcessTemplate {
    pub id: ProcessTemplateId,
    pub name: String,
    pub periodicity: PeriodicityUnit,
    pub frequency: u32,
    pub enabled: bool,
}

/// Which milestone templates a process template expands into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct ProcessMilestoneLink {
    pub process_template_id: ProcessTemplateId,
    pub milestone_template_id: MilestoneTemplateId,
}

/// One process for one client in one period.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClientProcessInstance {
    pub id: ClientProcessId,
    pub client_id: ClientId,
    pub process_template_id: ProcessTemplateId,
    pub year: i32,
    pub month: u32,
    pub start_date: NaiveDate,
}

impl ClientProcessInstance {
    #[must_use]
    pub const fn period(&self) -> Period {
        Period::new(self.year, self.month)
    }
}
