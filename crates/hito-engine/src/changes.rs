//! Change-set tracker for deadline edits.
//!
//! Every staged value is diffed against the instance's last persisted value,
//! never against an earlier staged value: staging the original back removes
//! the pending field, so no-op edits never show up in [`ChangeSet::list_changes`].
//!
//! The tracker holds no store handle. Committing is done by
//! [`crate::service::CalendarService::commit`], which drains it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveTime};
use hito_core::calendar::{format_date, format_time, normalize_time};
use hito_core::entities::{InstanceId, MilestoneInstance};
use hito_core::enums::EditField;
use serde::Serialize;

use crate::error::EngineError;

/// A single field edit requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineEdit {
    /// `None` means the date was blanked, which is always rejected.
    Date(Option<NaiveDate>),
    /// `None` clears the time (end of day applies).
    Time(Option<NaiveTime>),
}

impl DeadlineEdit {
    #[must_use]
    pub const fn field(&self) -> EditField {
        match self {
            Self::Date(_) => EditField::DeadlineDate,
            Self::Time(_) => EditField::DeadlineTime,
        }
    }
}

/// Value of an editable field, before or after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Date(NaiveDate),
    Time(Option<NaiveTime>),
}

impl FieldValue {
    /// Text form stored on audit records: `YYYY-MM-DD`, `HH:MM`, or `None`.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Date(date) => Some(format_date(*date)),
            Self::Time(time) => time.map(format_time),
        }
    }
}

/// One `(instance, field, previous, new)` entry of the change list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub instance_id: InstanceId,
    pub field: EditField,
    pub previous: FieldValue,
    pub new: FieldValue,
}

/// Staged, not yet committed values for one instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingEdit {
    pub deadline_date: Option<NaiveDate>,
    pub deadline_time: Option<Option<NaiveTime>>,
}

impl PendingEdit {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.deadline_date.is_none() && self.deadline_time.is_none()
    }
}

/// Last persisted deadline of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Baseline {
    deadline_date: NaiveDate,
    deadline_time: Option<NaiveTime>,
}

impl From<&MilestoneInstance> for Baseline {
    fn from(instance: &MilestoneInstance) -> Self {
        Self {
            deadline_date: instance.deadline_date,
            deadline_time: instance.deadline_time.map(normalize_time),
        }
    }
}

/// Everything staged for one instance, as handed to the commit.
///
/// An empty `changes` list marks an instance that was saved without any
/// difference and only gets the sentinel audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedInstance {
    pub instance_id: InstanceId,
    pub edit: PendingEdit,
    pub changes: Vec<FieldChange>,
}

/// Pending deadline edits of one session.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    baselines: HashMap<InstanceId, Baseline>,
    pending: BTreeMap<InstanceId, PendingEdit>,
    touched: BTreeSet<InstanceId>,
}

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the persisted baselines, e.g. after a re-fetch.
    ///
    /// Pending entries for instances that are gone, or that now equal the new
    /// baseline, are dropped.
    pub fn load<'a, I>(&mut self, instances: I)
    where
        I: IntoIterator<Item = &'a MilestoneInstance>,
    {
        self.baselines = instances
            .into_iter()
            .map(|instance| (instance.id, Baseline::from(instance)))
            .collect();

        let baselines = &self.baselines;
        self.pending.retain(|id, edit| {
            let Some(baseline) = baselines.get(id) else {
                return false;
            };
            if edit.deadline_date == Some(baseline.deadline_date) {
                edit.deadline_date = None;
            }
            if edit.deadline_time == Some(baseline.deadline_time) {
                edit.deadline_time = None;
            }
            !edit.is_empty()
        });
        self.touched.retain(|id| baselines.contains_key(id));
    }

    /// Record or overwrite a pending value for one field.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` when the deadline date is blanked or
    /// the instance has no known persisted value. Pending state is unchanged
    /// on error.
    pub fn stage_edit(&mut self, instance_id: InstanceId, edit: DeadlineEdit) -> Result<(), EngineError> {
        let baseline = *self.baselines.get(&instance_id).ok_or_else(|| {
            EngineError::Validation(format!("milestone instance {instance_id} is not loaded"))
        })?;

        if edit == DeadlineEdit::Date(None) {
            return Err(EngineError::Validation(
                "deadline date cannot be empty; keep the previous value".into(),
            ));
        }

        let entry = self.pending.entry(instance_id).or_default();
        match edit {
            DeadlineEdit::Date(date) => {
                entry.deadline_date = date.filter(|d| *d != baseline.deadline_date);
            }
            DeadlineEdit::Time(time) => {
                let time = time.map(normalize_time);
                entry.deadline_time = (time != baseline.deadline_time).then_some(time);
            }
        }
        if entry.is_empty() {
            self.pending.remove(&instance_id);
        }
        Ok(())
    }

    /// Mark an instance as saved, even if nothing changed.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` if the instance is not loaded.
    pub fn touch(&mut self, instance_id: InstanceId) -> Result<(), EngineError> {
        if !self.baselines.contains_key(&instance_id) {
            return Err(EngineError::Validation(format!(
                "milestone instance {instance_id} is not loaded"
            )));
        }
        self.touched.insert(instance_id);
        Ok(())
    }

    #[must_use]
    pub fn pending(&self, instance_id: InstanceId) -> Option<&PendingEdit> {
        self.pending.get(&instance_id)
    }

    /// All staged field changes, ordered by instance id then field.
    #[must_use]
    pub fn list_changes(&self) -> Vec<FieldChange> {
        self.pending
            .iter()
            .flat_map(|(id, edit)| self.changes_of(*id, edit))
            .collect()
    }

    /// Whether nothing is staged or touched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.touched.is_empty()
    }

    /// Discard every staged edit.
    pub fn cancel(&mut self) {
        self.pending.clear();
        self.touched.clear();
    }

    /// Discard staged edits of one instance only.
    pub fn discard_instance(&mut self, instance_id: InstanceId) {
        self.pending.remove(&instance_id);
        self.touched.remove(&instance_id);
    }

    /// Take everything staged, leaving the change-set empty.
    pub(crate) fn drain(&mut self) -> Vec<StagedInstance> {
        let pending = std::mem::take(&mut self.pending);
        let touched = std::mem::take(&mut self.touched);

        let mut staged: Vec<StagedInstance> = pending
            .into_iter()
            .map(|(instance_id, edit)| StagedInstance {
                instance_id,
                edit,
                changes: self.changes_of(instance_id, &edit),
            })
            .collect();
        let untouched: Vec<StagedInstance> = touched
            .into_iter()
            .filter(|id| !staged.iter().any(|s| s.instance_id == *id))
            .map(|instance_id| StagedInstance {
                instance_id,
                edit: PendingEdit::default(),
                changes: Vec::new(),
            })
            .collect();
        staged.extend(untouched);
        staged.sort_by_key(|s| s.instance_id);
        staged
    }

    fn changes_of(&self, instance_id: InstanceId, edit: &PendingEdit) -> Vec<FieldChange> {
        let Some(baseline) = self.baselines.get(&instance_id) else {
            return Vec::new();
        };
        let mut changes = Vec::with_capacity(2);
        if let Some(date) = edit.deadline_date {
            changes.push(FieldChange {
                instance_id,
                field: EditField::DeadlineDate,
                previous: FieldValue::Date(baseline.deadline_date),
                new: FieldValue::Date(date),
            });
        }
        if let Some(time) = edit.deadline_time {
            changes.push(FieldChange {
                instance_id,
                field: EditField::DeadlineTime,
                previous: FieldValue::Time(baseline.deadline_time),
                new: FieldValue::Time(time),
            });
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::fixtures;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn loaded() -> ChangeSet {
        let snapshot = fixtures::snapshot();
        let mut changes = ChangeSet::new();
        changes.load(&snapshot.milestone_instances);
        changes
    }

    #[test]
    fn staging_a_new_date_lists_one_change() {
        let mut changes = loaded();
        changes
            .stage_edit(fixtures::INST_PAYSLIP_OPEN, DeadlineEdit::Date(Some(date("2025-03-31"))))
            .unwrap();

        assert_eq!(
            changes.list_changes(),
            vec![FieldChange {
                instance_id: fixtures::INST_PAYSLIP_OPEN,
                field: EditField::DeadlineDate,
                previous: FieldValue::Date(date("2025-03-28")),
                new: FieldValue::Date(date("2025-03-31")),
            }]
        );
    }

    #[test]
    fn staging_the_original_value_removes_the_entry() {
        let mut changes = loaded();
        let id = fixtures::INST_PAYSLIP_OPEN;
        changes.stage_edit(id, DeadlineEdit::Date(Some(date("2025-03-31")))).unwrap();
        changes.stage_edit(id, DeadlineEdit::Date(Some(date("2025-03-28")))).unwrap();

        assert!(changes.list_changes().is_empty());
        assert!(changes.pending(id).is_none());
        assert!(changes.is_empty());
    }

    #[test]
    fn reverting_one_field_keeps_the_other() {
        let mut changes = loaded();
        let id = fixtures::INST_PAYSLIP_OPEN;
        changes.stage_edit(id, DeadlineEdit::Date(Some(date("2025-03-31")))).unwrap();
        changes.stage_edit(id, DeadlineEdit::Time(Some(time(12, 0, 0)))).unwrap();
        changes.stage_edit(id, DeadlineEdit::Time(Some(time(17, 0, 0)))).unwrap();

        let listed = changes.list_changes();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].field, EditField::DeadlineDate);
    }

    #[test]
    fn time_with_seconds_equal_to_original_is_not_a_change() {
        let mut changes = loaded();
        changes
            .stage_edit(fixtures::INST_PAYSLIP_OPEN, DeadlineEdit::Time(Some(time(17, 0, 42))))
            .unwrap();
        assert!(changes.list_changes().is_empty());
    }

    #[test]
    fn clearing_a_time_is_a_change() {
        let mut changes = loaded();
        changes
            .stage_edit(fixtures::INST_PAYSLIP_OPEN, DeadlineEdit::Time(None))
            .unwrap();
        let listed = changes.list_changes();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].previous.render().as_deref(), Some("17:00"));
        assert_eq!(listed[0].new.render(), None);
    }

    #[test]
    fn blank_date_is_rejected_and_state_kept() {
        let mut changes = loaded();
        let id = fixtures::INST_PAYSLIP_OPEN;
        changes.stage_edit(id, DeadlineEdit::Date(Some(date("2025-04-02")))).unwrap();

        let err = changes.stage_edit(id, DeadlineEdit::Date(None)).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert_eq!(changes.pending(id).unwrap().deadline_date, Some(date("2025-04-02")));
    }

    #[test]
    fn unknown_instance_is_rejected() {
        let mut changes = loaded();
        let err = changes
            .stage_edit(9_999, DeadlineEdit::Date(Some(date("2025-04-02"))))
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert!(changes.touch(9_999).is_err());
    }

    #[test]
    fn disabled_instances_can_still_be_staged() {
        let mut changes = loaded();
        changes
            .stage_edit(fixtures::INST_LEDGER_DISABLED, DeadlineEdit::Date(Some(date("2025-03-25"))))
            .unwrap();
        assert_eq!(changes.list_changes().len(), 1);
    }

    #[test]
    fn discard_instance_leaves_others() {
        let mut changes = loaded();
        changes
            .stage_edit(fixtures::INST_PAYSLIP_OPEN, DeadlineEdit::Date(Some(date("2025-03-31"))))
            .unwrap();
        changes
            .stage_edit(fixtures::INST_PAYSLIP_OVERDUE, DeadlineEdit::Date(Some(date("2025-03-20"))))
            .unwrap();

        changes.discard_instance(fixtures::INST_PAYSLIP_OPEN);

        let ids: Vec<_> = changes.list_changes().iter().map(|c| c.instance_id).collect();
        assert_eq!(ids, vec![fixtures::INST_PAYSLIP_OVERDUE]);
    }

    #[test]
    fn cancel_discards_everything() {
        let mut changes = loaded();
        changes
            .stage_edit(fixtures::INST_PAYSLIP_OPEN, DeadlineEdit::Date(Some(date("2025-03-31"))))
            .unwrap();
        changes.touch(fixtures::INST_VAT_DUE_TODAY).unwrap();

        changes.cancel();

        assert!(changes.is_empty());
        assert!(changes.drain().is_empty());
    }

    #[test]
    fn drain_includes_touched_instances_without_changes() {
        let mut changes = loaded();
        changes
            .stage_edit(fixtures::INST_PAYSLIP_OPEN, DeadlineEdit::Date(Some(date("2025-03-31"))))
            .unwrap();
        changes.touch(fixtures::INST_PAYSLIP_OPEN).unwrap();
        changes.touch(fixtures::INST_VAT_DUE_TODAY).unwrap();

        let staged = changes.drain();
        assert_eq!(staged.len(), 2);
        let touched = staged
            .iter()
            .find(|s| s.instance_id == fixtures::INST_VAT_DUE_TODAY)
            .unwrap();
        assert!(touched.changes.is_empty());
        assert!(touched.edit.is_empty());
        assert!(changes.is_empty());
    }

    #[test]
    fn reload_drops_edits_that_match_new_baseline() {
        let mut snapshot = fixtures::snapshot();
        let mut changes = ChangeSet::new();
        changes.load(&snapshot.milestone_instances);
        changes
            .stage_edit(fixtures::INST_PAYSLIP_OPEN, DeadlineEdit::Date(Some(date("2025-03-31"))))
            .unwrap();

        for instance in &mut snapshot.milestone_instances {
            if instance.id == fixtures::INST_PAYSLIP_OPEN {
                instance.deadline_date = date("2025-03-31");
            }
        }
        changes.load(&snapshot.milestone_instances);

        assert!(changes.list_changes().is_empty());
    }
}
