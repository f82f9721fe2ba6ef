use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{AuditId, ClientId, InstanceId, MilestoneTemplateId};
use crate::enums::{AuditField, ReasonCode};

/// An append-only audit trail entry for one changed field of one instance.
///
/// Values are rendered as text: dates `YYYY-MM-DD`, times `HH:MM`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditRecord {
    /// Assigned by the store on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AuditId>,
    pub client_id: ClientId,
    pub instance_id: InstanceId,
    pub milestone_template_id: MilestoneTemplateId,
    pub field: AuditField,
    pub previous_value: Option<String>,
    pub new_value: Option<String>,
    pub username: String,
    pub recorded_at: DateTime<Utc>,
    pub reason: ReasonCode,
    pub note: Option<String>,
    pub process_name: String,
    pub milestone_name: String,
    pub subdepartment: Option<String>,
}
