//! `CalendarService`: the calendar of one client, one period at a time.
//!
//! Reads go through the [`MilestoneStore`] and fall back to empty collections
//! when they fail. Mutations are batches (commit, cascading disable) that
//! continue past per-item failures and re-fetch the period when done.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use hito_core::calendar::Period;
use hito_core::entities::{
    AuditRecord, ClientId, ClientProcessId, CompletionRecord, InstanceId, MilestoneInstance,
};
use hito_core::enums::{DisplayStatus, ReasonCode};

use crate::audit::AuditDiffBuilder;
use crate::cascade::{self, DisableSelection};
use crate::catalog::Catalog;
use crate::changes::{ChangeSet, DeadlineEdit, FieldChange};
use crate::error::{EngineError, StoreError};
use crate::outcome::{BatchOutcome, BatchTarget};
use crate::pipeline::{self, Page, ViewState};
use crate::row::CalendarRow;
use crate::store::{CompletionOrder, IdentityProvider, MilestoneStore};
use crate::updates::MilestoneInstanceUpdateBuilder;

pub struct CalendarService<S, I> {
    store: S,
    identity: I,
    client_id: ClientId,
    period: Option<Period>,
    catalog: Catalog,
    rows: Vec<CalendarRow>,
    changes: ChangeSet,
}

impl<S, I> CalendarService<S, I>
where
    S: MilestoneStore,
    I: IdentityProvider,
{
    /// Create a service for `client_id`. Nothing is loaded until
    /// [`CalendarService::load_period`].
    pub fn new(store: S, identity: I, client_id: ClientId) -> Self {
        Self {
            store,
            identity,
            client_id,
            period: None,
            catalog: Catalog::default(),
            rows: Vec::new(),
            changes: ChangeSet::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Fetch reference data and the milestone instances of `period`.
    ///
    /// Staged edits survive the reload as long as their instance is still in
    /// the period and still differs from the persisted value.
    pub async fn load_period(&mut self, period: Period) {
        let client_processes = fetch_or_empty(
            "client processes",
            self.store.fetch_client_processes(self.client_id).await,
        );
        let process_templates =
            fetch_or_empty("process templates", self.store.fetch_process_templates().await);
        let milestone_templates = fetch_or_empty(
            "milestone templates",
            self.store.fetch_milestone_templates().await,
        );
        let links = fetch_or_empty(
            "process milestone links",
            self.store.fetch_process_milestone_links().await,
        );
        self.catalog = Catalog::new(milestone_templates, process_templates, links, client_processes);

        let in_period: Vec<ClientProcessId> = self
            .catalog
            .periods()
            .get(&period)
            .map(|cps| cps.iter().map(|cp| cp.id).collect())
            .unwrap_or_default();
        let instances = if in_period.is_empty() {
            Vec::new()
        } else {
            fetch_or_empty(
                "milestone instances",
                self.store.fetch_milestone_instances(&in_period).await,
            )
        };

        let mut rows = Vec::with_capacity(instances.len());
        for instance in instances {
            let last_completion = if instance.status.is_completed() {
                self.latest_completion(instance.id).await
            } else {
                None
            };
            rows.push(CalendarRow {
                client_id: self.client_id,
                process_name: self.catalog.process_name(instance.client_process_id).to_owned(),
                milestone_name: self
                    .catalog
                    .milestone_name(instance.milestone_template_id)
                    .to_owned(),
                last_completion,
                instance,
            });
        }

        tracing::debug!(
            "Loaded {} milestone instances for client {} in {}",
            rows.len(),
            self.client_id,
            period
        );
        self.changes.load(rows.iter().map(|r| &r.instance));
        self.rows = rows;
        self.period = Some(period);
    }

    /// Re-fetch the current period, if one is loaded.
    pub async fn refresh(&mut self) {
        if let Some(period) = self.period {
            self.load_period(period).await;
        }
    }

    async fn latest_completion(&self, instance_id: InstanceId) -> Option<chrono::NaiveDateTime> {
        match self
            .store
            .fetch_completion_records(instance_id, 1, CompletionOrder::NewestFirst)
            .await
        {
            Ok(records) => records.first().map(CompletionRecord::timestamp),
            Err(e) => {
                tracing::warn!("Failed to fetch completions of instance {}: {}", instance_id, e);
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub const fn period(&self) -> Option<Period> {
        self.period
    }

    /// Periods the client has processes in, oldest first, with their process count.
    pub fn periods(&self) -> BTreeMap<Period, usize> {
        self.catalog
            .periods()
            .into_iter()
            .map(|(period, processes)| (period, processes.len()))
            .collect()
    }

    /// Every loaded row of the period, disabled ones included.
    pub fn rows(&self) -> &[CalendarRow] {
        &self.rows
    }

    pub fn row(&self, instance_id: InstanceId) -> Option<&CalendarRow> {
        self.rows.iter().find(|r| r.id() == instance_id)
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub const fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn page(&self, view: &ViewState, today: NaiveDate) -> Page<'_> {
        view.apply(&self.rows, today)
    }

    pub fn status_counts(&self, today: NaiveDate) -> BTreeMap<DisplayStatus, usize> {
        pipeline::status_counts(&self.rows, today)
    }

    /// Completion history of one instance, newest first.
    pub async fn completion_history(
        &self,
        instance_id: InstanceId,
        limit: usize,
    ) -> Vec<CompletionRecord> {
        fetch_or_empty(
            "completion records",
            self.store
                .fetch_completion_records(instance_id, limit, CompletionOrder::NewestFirst)
                .await,
        )
    }

    /// Audit trail of the client, oldest first.
    pub async fn audit_trail(&self) -> Vec<AuditRecord> {
        fetch_or_empty(
            "audit records",
            self.store.fetch_audit_records(self.client_id).await,
        )
    }

    // -----------------------------------------------------------------------
    // Staging
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// See [`ChangeSet::stage_edit`].
    pub fn stage_edit(&mut self, instance_id: InstanceId, edit: DeadlineEdit) -> Result<(), EngineError> {
        self.changes.stage_edit(instance_id, edit)
    }

    /// # Errors
    ///
    /// See [`ChangeSet::touch`].
    pub fn touch(&mut self, instance_id: InstanceId) -> Result<(), EngineError> {
        self.changes.touch(instance_id)
    }

    pub fn list_changes(&self) -> Vec<FieldChange> {
        self.changes.list_changes()
    }

    pub fn cancel(&mut self) {
        self.changes.cancel();
    }

    pub fn discard_instance(&mut self, instance_id: InstanceId) {
        self.changes.discard_instance(instance_id);
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Persist every staged instance and write its audit records.
    ///
    /// Each instance is one update carrying all of its staged fields. A failed
    /// update is recorded and the batch moves on; its fields get no audit
    /// record. Touched instances without changes only get a `no_changes`
    /// audit record. Audit write failures are counted and never undo the
    /// update. The change-set is emptied and the period re-fetched.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when `reason` is missing. Nothing
    /// reaches the store in that case.
    pub async fn commit(
        &mut self,
        reason: Option<ReasonCode>,
        note: Option<&str>,
    ) -> Result<BatchOutcome, EngineError> {
        let reason = reason
            .ok_or_else(|| EngineError::Validation("a reason code is required to save".into()))?;
        if self.changes.is_empty() {
            return Ok(BatchOutcome::default());
        }

        let user = self.identity.acting_user();
        let audit = AuditDiffBuilder::new(reason, note, &user, Utc::now());
        let staged = self.changes.drain();
        let mut outcome = BatchOutcome::default();

        for item in &staged {
            let Some(row) = self.rows.iter().find(|r| r.id() == item.instance_id) else {
                outcome.record_failure(
                    BatchTarget::Instance(item.instance_id),
                    StoreError::NotFound {
                        entity: "milestone instance",
                        id: item.instance_id,
                    },
                );
                continue;
            };
            let context = row.audit_context();

            let records = if item.changes.is_empty() {
                outcome.record_success();
                vec![audit.no_changes(&context)]
            } else {
                let update = MilestoneInstanceUpdateBuilder::for_instance(&row.instance)
                    .pending(&item.edit)
                    .build();
                tracing::debug!(
                    "Persisting {} field change(s) on instance {}",
                    item.changes.len(),
                    item.instance_id
                );
                match self
                    .store
                    .persist_milestone_instance_update(item.instance_id, &update)
                    .await
                {
                    Ok(_) => {
                        outcome.record_success();
                        item.changes
                            .iter()
                            .map(|change| audit.field_change(&context, change))
                            .collect()
                    }
                    Err(e) => {
                        tracing::warn!("Update of instance {} failed: {}", item.instance_id, e);
                        outcome.record_failure(BatchTarget::Instance(item.instance_id), e);
                        continue;
                    }
                }
            };

            for record in records {
                match self.store.create_audit_record(&record).await {
                    Ok(stored) => outcome.audit_records.push(stored),
                    Err(e) => {
                        tracing::warn!(
                            "Audit record for instance {} ({}) not written: {}",
                            record.instance_id,
                            record.field,
                            e
                        );
                        outcome.audit_failures += 1;
                    }
                }
            }
        }

        tracing::info!(
            "Commit by {}: {} of {} instance(s) saved, {} audit record(s), {} audit failure(s)",
            user.username,
            outcome.succeeded,
            outcome.attempted,
            outcome.audit_records.len(),
            outcome.audit_failures
        );
        self.refresh().await;
        Ok(outcome)
    }

    /// Disable the selected templates for this client from `cutoff` on.
    ///
    /// Selecting client-process instances disables each of their templates
    /// client-wide, see [`crate::cascade`]. No audit records are written.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] if a selected process belongs to
    /// another client and [`EngineError::Store`] if a process selection cannot
    /// be resolved. No instance has been disabled in either case.
    pub async fn disable_from(
        &mut self,
        selection: &DisableSelection,
        cutoff: NaiveDate,
    ) -> Result<BatchOutcome, EngineError> {
        let templates =
            cascade::resolve_templates(&self.store, self.client_id, selection).await?;
        let outcome =
            cascade::disable_templates(&self.store, self.client_id, cutoff, &templates).await;
        tracing::info!(
            "Disabled {} of {} template(s) for client {} from {}",
            outcome.succeeded,
            outcome.attempted,
            self.client_id,
            cutoff
        );
        self.refresh().await;
        Ok(outcome)
    }

    /// Enable or disable a single loaded instance.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] if the instance is not loaded and
    /// [`EngineError::Store`] if the update fails.
    pub async fn set_enabled(
        &mut self,
        instance_id: InstanceId,
        enabled: bool,
    ) -> Result<MilestoneInstance, EngineError> {
        let row = self.row(instance_id).ok_or_else(|| {
            EngineError::Validation(format!("milestone instance {instance_id} is not loaded"))
        })?;
        let update = MilestoneInstanceUpdateBuilder::for_instance(&row.instance)
            .enabled(enabled)
            .build();
        let updated = self
            .store
            .persist_milestone_instance_update(instance_id, &update)
            .await?;
        self.refresh().await;
        Ok(updated)
    }
}

fn fetch_or_empty<T>(what: &str, result: Result<Vec<T>, StoreError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!("Failed to fetch {}: {}", what, e);
        Vec::new()
    })
}
