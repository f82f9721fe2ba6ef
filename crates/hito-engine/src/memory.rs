//! In-memory record store over a serialisable snapshot.
//!
//! Backs the CLI (the snapshot is read from and written to a JSON file) and
//! the tests, which can make individual commands fail on purpose and inspect
//! which commands reached the store.

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use hito_core::entities::{
    AuditRecord, ClientId, ClientProcessId, ClientProcessInstance, CompletionRecord, InstanceId,
    MilestoneInstance, MilestoneTemplate, MilestoneTemplateId, ProcessMilestoneLink,
    ProcessTemplate,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::store::{CompletionOrder, MilestoneStore};
use crate::updates::MilestoneInstanceUpdate;

/// Everything the store holds. Missing collections deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub milestone_templates: Vec<MilestoneTemplate>,
    pub process_templates: Vec<ProcessTemplate>,
    pub process_milestone_links: Vec<ProcessMilestoneLink>,
    pub client_processes: Vec<ClientProcessInstance>,
    pub milestone_instances: Vec<MilestoneInstance>,
    pub completions: Vec<CompletionRecord>,
    pub audit_records: Vec<AuditRecord>,
}

impl Snapshot {
    /// Read a JSON snapshot. A missing file yields an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the file exists but cannot be
    /// read or parsed.
    pub fn read_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))
    }

    /// Write the snapshot as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on any I/O or encoding failure.
    pub fn write_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Unavailable(format!("{}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))
    }

    fn client_process_ids(&self, client_id: ClientId) -> HashSet<ClientProcessId> {
        self.client_processes
            .iter()
            .filter(|cp| cp.client_id == client_id)
            .map(|cp| cp.id)
            .collect()
    }
}

/// Commands that reached the store, failed ones included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallLog {
    pub updates: Vec<InstanceId>,
    pub disables: Vec<(MilestoneTemplateId, NaiveDate, ClientId)>,
    pub audit_writes: usize,
}

#[derive(Debug, Default)]
struct Faults {
    updates: HashSet<InstanceId>,
    disables: HashSet<MilestoneTemplateId>,
    audit_writes: bool,
    reads: bool,
}

#[derive(Debug, Default)]
struct State {
    snapshot: Snapshot,
    faults: Faults,
    calls: CallLog,
}

impl State {
    fn check_read(&self) -> Result<(), StoreError> {
        if self.faults.reads {
            Err(StoreError::Unavailable("reads refused".into()))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            state: Mutex::new(State {
                snapshot,
                ..State::default()
            }),
        }
    }

    /// Copy of the current contents.
    pub async fn snapshot(&self) -> Snapshot {
        self.state.lock().await.snapshot.clone()
    }

    pub async fn calls(&self) -> CallLog {
        self.state.lock().await.calls.clone()
    }

    /// Reject every update addressed to `instance_id`.
    pub async fn fail_updates_for(&self, instance_id: InstanceId) {
        self.state.lock().await.faults.updates.insert(instance_id);
    }

    /// Reject every disable command for `template_id`.
    pub async fn fail_disable_for(&self, template_id: MilestoneTemplateId) {
        self.state.lock().await.faults.disables.insert(template_id);
    }

    pub async fn fail_audit_writes(&self, fail: bool) {
        self.state.lock().await.faults.audit_writes = fail;
    }

    pub async fn fail_reads(&self, fail: bool) {
        self.state.lock().await.faults.reads = fail;
    }
}

#[async_trait]
impl MilestoneStore for InMemoryStore {
    async fn fetch_client_processes(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<ClientProcessInstance>, StoreError> {
        let state = self.state.lock().await;
        state.check_read()?;
        let mut found: Vec<_> = state
            .snapshot
            .client_processes
            .iter()
            .filter(|cp| cp.client_id == client_id)
            .cloned()
            .collect();
        found.sort_by_key(|cp| cp.id);
        Ok(found)
    }

    async fn fetch_process_templates(&self) -> Result<Vec<ProcessTemplate>, StoreError> {
        let state = self.state.lock().await;
        state.check_read()?;
        Ok(state.snapshot.process_templates.clone())
    }

    async fn fetch_milestone_templates(&self) -> Result<Vec<MilestoneTemplate>, StoreError> {
        let state = self.state.lock().await;
        state.check_read()?;
        Ok(state.snapshot.milestone_templates.clone())
    }

    async fn fetch_process_milestone_links(
        &self,
    ) -> Result<Vec<ProcessMilestoneLink>, StoreError> {
        let state = self.state.lock().await;
        state.check_read()?;
        Ok(state.snapshot.process_milestone_links.clone())
    }

    async fn fetch_milestone_instances(
        &self,
        client_process_ids: &[ClientProcessId],
    ) -> Result<Vec<MilestoneInstance>, StoreError> {
        let state = self.state.lock().await;
        state.check_read()?;
        let mut found: Vec<_> = state
            .snapshot
            .milestone_instances
            .iter()
            .filter(|i| client_process_ids.contains(&i.client_process_id))
            .cloned()
            .collect();
        found.sort_by_key(|i| i.id);
        Ok(found)
    }

    async fn fetch_completion_records(
        &self,
        instance_id: InstanceId,
        limit: usize,
        order: CompletionOrder,
    ) -> Result<Vec<CompletionRecord>, StoreError> {
        let state = self.state.lock().await;
        state.check_read()?;
        let mut found: Vec<_> = state
            .snapshot
            .completions
            .iter()
            .filter(|c| c.instance_id == instance_id)
            .cloned()
            .collect();
        found.sort_by_key(CompletionRecord::timestamp);
        if order == CompletionOrder::NewestFirst {
            found.reverse();
        }
        found.truncate(limit);
        Ok(found)
    }

    async fn persist_milestone_instance_update(
        &self,
        instance_id: InstanceId,
        update: &MilestoneInstanceUpdate,
    ) -> Result<MilestoneInstance, StoreError> {
        let mut state = self.state.lock().await;
        state.calls.updates.push(instance_id);
        if state.faults.updates.contains(&instance_id) {
            return Err(StoreError::Rejected(format!(
                "update of instance {instance_id} refused"
            )));
        }
        let instance = state
            .snapshot
            .milestone_instances
            .iter_mut()
            .find(|i| i.id == instance_id)
            .ok_or(StoreError::NotFound {
                entity: "milestone instance",
                id: instance_id,
            })?;

        instance.status = update.status;
        instance.status_changed_at = update.status_changed_at;
        if let Some(date) = update.deadline_date {
            instance.deadline_date = date;
        }
        if let Some(time) = update.deadline_time {
            instance.deadline_time = time;
        }
        if let Some(enabled) = update.enabled {
            instance.enabled = enabled;
        }
        Ok(instance.clone())
    }

    async fn disable_instances_by_template_from_date(
        &self,
        template_id: MilestoneTemplateId,
        cutoff: NaiveDate,
        client_id: ClientId,
    ) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.calls.disables.push((template_id, cutoff, client_id));
        if state.faults.disables.contains(&template_id) {
            return Err(StoreError::Rejected(format!(
                "disable of template {template_id} refused"
            )));
        }
        let owned = state.snapshot.client_process_ids(client_id);
        state
            .snapshot
            .milestone_instances
            .iter_mut()
            .filter(|i| {
                i.enabled
                    && i.milestone_template_id == template_id
                    && i.deadline_date >= cutoff
                    && owned.contains(&i.client_process_id)
            })
            .for_each(|i| i.enabled = false);
        Ok(())
    }

    async fn create_audit_record(&self, record: &AuditRecord) -> Result<AuditRecord, StoreError> {
        let mut state = self.state.lock().await;
        state.calls.audit_writes += 1;
        if state.faults.audit_writes {
            return Err(StoreError::Unavailable("audit log offline".into()));
        }
        let next_id = state
            .snapshot
            .audit_records
            .iter()
            .filter_map(|r| r.id)
            .max()
            .unwrap_or(0)
            + 1;
        let stored = AuditRecord {
            id: Some(next_id),
            ..record.clone()
        };
        state.snapshot.audit_records.push(stored.clone());
        Ok(stored)
    }

    async fn fetch_audit_records(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<AuditRecord>, StoreError> {
        let state = self.state.lock().await;
        state.check_read()?;
        let mut found: Vec<_> = state
            .snapshot
            .audit_records
            .iter()
            .filter(|r| r.client_id == client_id)
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.recorded_at, r.id));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::fixtures;
    use crate::updates::MilestoneInstanceUpdateBuilder;

    #[tokio::test]
    async fn completions_are_ordered_and_limited() {
        let store = InMemoryStore::new(fixtures::snapshot());
        let newest = store
            .fetch_completion_records(fixtures::INST_VAT_COMPLETED, 1, CompletionOrder::NewestFirst)
            .await
            .unwrap();
        assert_eq!(newest.len(), 1);
        assert_eq!(newest[0].date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());

        let oldest = store
            .fetch_completion_records(fixtures::INST_VAT_COMPLETED, 5, CompletionOrder::OldestFirst)
            .await
            .unwrap();
        assert_eq!(oldest.len(), 2);
        assert_eq!(oldest[0].date, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    }

    #[tokio::test]
    async fn update_applies_only_sent_fields() {
        let store = InMemoryStore::new(fixtures::snapshot());
        let before = store
            .snapshot()
            .await
            .milestone_instances
            .into_iter()
            .find(|i| i.id == fixtures::INST_PAYSLIP_OPEN)
            .unwrap();
        let update = MilestoneInstanceUpdateBuilder::for_instance(&before)
            .deadline_date(NaiveDate::from_ymd_opt(2025, 4, 2).unwrap())
            .build();

        let after = store
            .persist_milestone_instance_update(fixtures::INST_PAYSLIP_OPEN, &update)
            .await
            .unwrap();
        assert_eq!(after.deadline_date, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
        assert_eq!(after.deadline_time, before.deadline_time);
        assert_eq!(after.enabled, before.enabled);
    }

    #[tokio::test]
    async fn unknown_instance_is_not_found() {
        let store = InMemoryStore::new(Snapshot::default());
        let update = MilestoneInstanceUpdateBuilder::new(
            hito_core::enums::LifecycleStatus::Open,
            None,
        )
        .build();
        let err = store
            .persist_milestone_instance_update(42, &update)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                entity: "milestone instance",
                id: 42
            }
        );
    }

    #[tokio::test]
    async fn audit_ids_are_sequential() {
        let store = InMemoryStore::new(Snapshot::default());
        let record = fixtures::audit_record(fixtures::INST_PAYSLIP_OPEN);
        let first = store.create_audit_record(&record).await.unwrap();
        let second = store.create_audit_record(&record).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(store.fetch_audit_records(fixtures::CLIENT).await.unwrap().len(), 2);
        assert!(store.fetch_audit_records(fixtures::OTHER_CLIENT).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_reads_report_unavailable() {
        let store = InMemoryStore::new(fixtures::snapshot());
        store.fail_reads(true).await;
        assert!(matches!(
            store.fetch_milestone_templates().await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn snapshot_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("snapshot.json");
        assert_eq!(Snapshot::read_from(&path).unwrap(), Snapshot::default());

        let snapshot = fixtures::snapshot();
        snapshot.write_to(&path).unwrap();
        assert_eq!(Snapshot::read_from(&path).unwrap(), snapshot);
    }

    #[test]
    fn corrupt_snapshot_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Snapshot::read_from(&path),
            Err(StoreError::Unavailable(_))
        ));
    }
}
