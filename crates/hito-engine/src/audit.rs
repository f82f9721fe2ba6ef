//! Audit diff builder.
//!
//! Turns committed field changes into immutable [`AuditRecord`]s. The builder
//! does not judge whether a change is real; the change-set only hands it
//! genuine differences. Values are rendered as text, times at `HH:MM`.

use chrono::{DateTime, Utc};
use hito_core::entities::{AuditRecord, ClientId, InstanceId, MilestoneTemplateId};
use hito_core::enums::{AuditField, ReasonCode};
use hito_core::identity::ActingUser;

use crate::changes::FieldChange;

/// Denormalised facts about the instance an audit record describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    pub client_id: ClientId,
    pub instance_id: InstanceId,
    pub milestone_template_id: MilestoneTemplateId,
    pub process_name: String,
    pub milestone_name: String,
}

/// Builds audit records sharing one reason, note, user and timestamp.
#[derive(Debug, Clone)]
pub struct AuditDiffBuilder<'a> {
    reason: ReasonCode,
    note: Option<&'a str>,
    user: &'a ActingUser,
    recorded_at: DateTime<Utc>,
}

impl<'a> AuditDiffBuilder<'a> {
    /// A blank or whitespace-only note is recorded as no note.
    #[must_use]
    pub fn new(
        reason: ReasonCode,
        note: Option<&'a str>,
        user: &'a ActingUser,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            reason,
            note: note.map(str::trim).filter(|n| !n.is_empty()),
            user,
            recorded_at,
        }
    }

    /// Record for one changed field. Always emits.
    #[must_use]
    pub fn field_change(&self, context: &AuditContext, change: &FieldChange) -> AuditRecord {
        self.record(
            context,
            AuditField::from(change.field),
            change.previous.render(),
            change.new.render(),
        )
    }

    /// Sentinel record for an instance saved without any field difference.
    #[must_use]
    pub fn no_changes(&self, context: &AuditContext) -> AuditRecord {
        self.record(context, AuditField::NoChanges, None, None)
    }

    fn record(
        &self,
        context: &AuditContext,
        field: AuditField,
        previous_value: Option<String>,
        new_value: Option<String>,
    ) -> AuditRecord {
        AuditRecord {
            id: None,
            client_id: context.client_id,
            instance_id: context.instance_id,
            milestone_template_id: context.milestone_template_id,
            field,
            previous_value,
            new_value,
            username: self.user.username.clone(),
            recorded_at: self.recorded_at,
            reason: self.reason,
            note: self.note.map(String::from),
            process_name: context.process_name.clone(),
            milestone_name: context.milestone_name.clone(),
            subdepartment: self.user.subdepartment.clone(),
        }
    }
}
