//! Collaborator contracts consumed by the engine.
//!
//! The record store owns persistence and transport. The engine only reads
//! collections from it and emits commands to it; it never assumes more than
//! these methods promise.

use async_trait::async_trait;
use chrono::NaiveDate;
use hito_core::entities::{
    AuditRecord, ClientId, ClientProcessId, ClientProcessInstance, CompletionRecord, InstanceId,
    MilestoneInstance, MilestoneTemplate, MilestoneTemplateId, ProcessMilestoneLink,
    ProcessTemplate,
};
use hito_core::identity::ActingUser;

use crate::error::StoreError;
use crate::updates::MilestoneInstanceUpdate;

/// Order in which completion records are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// The external record store.
///
/// Implementations must be `Send + Sync` so a service can be shared across
/// async task boundaries.
#[async_trait]
pub trait MilestoneStore: Send + Sync {
    /// Client-process instances of one client, across all periods.
    async fn fetch_client_processes(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<ClientProcessInstance>, StoreError>;

    async fn fetch_process_templates(&self) -> Result<Vec<ProcessTemplate>, StoreError>;

    async fn fetch_milestone_templates(&self) -> Result<Vec<MilestoneTemplate>, StoreError>;

    async fn fetch_process_milestone_links(&self)
    -> Result<Vec<ProcessMilestoneLink>, StoreError>;

    /// Milestone instances owned by any of the given client-process instances,
    /// enabled or not.
    async fn fetch_milestone_instances(
        &self,
        client_process_ids: &[ClientProcessId],
    ) -> Result<Vec<MilestoneInstance>, StoreError>;

    /// Completion history of one instance, at most `limit` entries.
    async fn fetch_completion_records(
        &self,
        instance_id: InstanceId,
        limit: usize,
        order: CompletionOrder,
    ) -> Result<Vec<CompletionRecord>, StoreError>;

    /// Partial update. Fields left `None` in `update` stay untouched.
    async fn persist_milestone_instance_update(
        &self,
        instance_id: InstanceId,
        update: &MilestoneInstanceUpdate,
    ) -> Result<MilestoneInstance, StoreError>;

    /// Disable every enabled instance of `template_id` for `client_id` whose
    /// deadline is on or after `cutoff`. Idempotent.
    async fn disable_instances_by_template_from_date(
        &self,
        template_id: MilestoneTemplateId,
        cutoff: NaiveDate,
        client_id: ClientId,
    ) -> Result<(), StoreError>;

    /// Append-only insert. Returns the record with its store-assigned id.
    async fn create_audit_record(&self, record: &AuditRecord) -> Result<AuditRecord, StoreError>;

    /// Audit trail of one client, oldest first.
    async fn fetch_audit_records(&self, client_id: ClientId)
    -> Result<Vec<AuditRecord>, StoreError>;
}

/// Source of the acting user, backed by the session's authentication context.
///
/// Treated as an always-available lookup.
pub trait IdentityProvider: Send + Sync {
    fn acting_user(&self) -> ActingUser;
}

/// Identity fixed at construction, e.g. from configuration.
#[derive(Debug, Clone)]
pub struct StaticIdentity(ActingUser);

impl StaticIdentity {
    #[must_use]
    pub const fn new(user: ActingUser) -> Self {
        Self(user)
    }
}

impl IdentityProvider for StaticIdentity {
    fn acting_user(&self) -> ActingUser {
        self.0.clone()
    }
}
