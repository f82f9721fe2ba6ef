use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::InstanceId;

/// A completion event logged against a milestone instance.
///
/// Owned by the record store; the engine only reads the most recent one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompletionRecord {
    pub instance_id: InstanceId,
    pub date: NaiveDate,
    /// Kept at full second precision; lateness is decided to the second.
    pub time: Option<NaiveTime>,
    /// Reference to the uploaded evidence file.
    pub evidence: Option<String>,
}

impl CompletionRecord {
    /// Completion instant in UTC. A record without a time counts from midnight.
    #[must_use]
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }
}
