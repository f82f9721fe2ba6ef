//! Update builder for milestone instance mutations.
//!
//! `status` and `status_changed_at` are always sent, mirroring what the record
//! store expects on every update. The other fields are `Option`: only `Some`
//! fields are applied by the store.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use hito_core::entities::MilestoneInstance;
use hito_core::enums::LifecycleStatus;
use serde::Serialize;

use crate::changes::PendingEdit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneInstanceUpdate {
    pub status: LifecycleStatus,
    pub status_changed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_time: Option<Option<NaiveTime>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

pub struct MilestoneInstanceUpdateBuilder(MilestoneInstanceUpdate);

impl MilestoneInstanceUpdateBuilder {
    #[must_use]
    pub const fn new(status: LifecycleStatus, status_changed_at: Option<DateTime<Utc>>) -> Self {
        Self(MilestoneInstanceUpdate {
            status,
            status_changed_at,
            deadline_date: None,
            deadline_time: None,
            enabled: None,
        })
    }

    /// Start from an instance's current lifecycle fields.
    #[must_use]
    pub const fn for_instance(instance: &MilestoneInstance) -> Self {
        Self::new(instance.status, instance.status_changed_at)
    }

    #[must_use]
    pub fn deadline_date(mut self, date: NaiveDate) -> Self {
        self.0.deadline_date = Some(date);
        self
    }

    #[must_use]
    pub fn deadline_time(mut self, time: Option<NaiveTime>) -> Self {
        self.0.deadline_time = Some(time);
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.0.enabled = Some(enabled);
        self
    }

    /// Copy every staged field of a pending edit.
    #[must_use]
    pub fn pending(mut self, edit: &PendingEdit) -> Self {
        if let Some(date) = edit.deadline_date {
            self = self.deadline_date(date);
        }
        if let Some(time) = edit.deadline_time {
            self = self.deadline_time(time);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> MilestoneInstanceUpdate {
        self.0
    }
}
