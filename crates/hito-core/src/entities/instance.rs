use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::{ClientProcessId, InstanceId, MilestoneTemplateId};
use crate::classify::classify;
use crate::enums::{DisplayStatus, LifecycleStatus, MilestoneKind};

/// The concrete, datable occurrence of a milestone for one client in one period.
///
/// Created by the record store's template expansion. Mutated only through
/// change-set commits and cascading disables; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MilestoneInstance {
    pub id: InstanceId,
    pub client_process_id: ClientProcessId,
    pub milestone_template_id: MilestoneTemplateId,
    pub deadline_date: NaiveDate,
    #[serde(default, with = "crate::calendar::hhmm")]
    #[schemars(with = "Option<String>")]
    pub deadline_time: Option<NaiveTime>,
    pub status: LifecycleStatus,
    pub status_changed_at: Option<DateTime<Utc>>,
    pub kind: MilestoneKind,
    #[serde(default)]
    pub critical: bool,
    #[serde(default)]
    pub mandatory: bool,
    /// Disabled instances are hidden from the calendar but stay auditable.
    #[serde(deserialize_with = "flag")]
    pub enabled: bool,
}

impl MilestoneInstance {
    /// Classify this instance against `today`.
    #[must_use]
    pub fn display_status(
        &self,
        last_completion: Option<NaiveDateTime>,
        today: NaiveDate,
    ) -> DisplayStatus {
        classify(
            Some(self.deadline_date),
            self.deadline_time,
            self.status,
            last_completion,
            today,
        )
    }
}

/// The store reports the enabled flag either as a boolean or as `0`/`1`.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}
