//! Status enums, display categories, reason codes and field names for Hitos.
//!
//! Enums use `snake_case` serialization unless the record store dictates a
//! different wire form (lifecycle status keeps its `Nuevo`/`Finalizado`
//! spelling, reason codes travel as integers).

use std::borrow::Cow;
use std::fmt;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// LifecycleStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a milestone instance as stored by the record store.
///
/// ```text
/// Nuevo (open) → Finalizado (completed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum LifecycleStatus {
    #[serde(rename = "Nuevo")]
    Open,
    #[serde(rename = "Finalizado")]
    Completed,
}

impl LifecycleStatus {
    /// Return the wire representation used by the record store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Nuevo",
            Self::Completed => "Finalizado",
        }
    }

    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DisplayStatus
// ---------------------------------------------------------------------------

/// Compliance category derived from deadline, lifecycle status and completion.
///
/// Never stored. Variant order is the urgency rank used when sorting by status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Overdue,
    DueToday,
    PendingOnTime,
    CompletedLate,
    CompletedOnTime,
    /// Deadline date missing. Persisted instances never reach this.
    NoDate,
}

impl DisplayStatus {
    /// All categories in rank order.
    pub const ALL: [Self; 6] = [
        Self::Overdue,
        Self::DueToday,
        Self::PendingOnTime,
        Self::CompletedLate,
        Self::CompletedOnTime,
        Self::NoDate,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
            Self::DueToday => "due_today",
            Self::PendingOnTime => "pending_on_time",
            Self::CompletedLate => "completed_late",
            Self::CompletedOnTime => "completed_on_time",
            Self::NoDate => "no_date",
        }
    }

    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::CompletedLate | Self::CompletedOnTime)
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PeriodicityUnit
// ---------------------------------------------------------------------------

/// Unit in which a template's recurrence frequency is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PeriodicityUnit {
    Day,
    Week,
    Month,
    Year,
}

impl PeriodicityUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for PeriodicityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MilestoneKind
// ---------------------------------------------------------------------------

/// Who is responsible for a milestone instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    Internal,
    Client,
    ThirdParty,
}

impl MilestoneKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Client => "client",
            Self::ThirdParty => "third_party",
        }
    }
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ReasonCode
// ---------------------------------------------------------------------------

/// Justification attached to every committed deadline edit.
///
/// Travels as an integer. `0` is the "unset" value of the console and is
/// rejected by [`ReasonCode::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ReasonCode {
    ClientRequest,
    RegulatoryChange,
    InternalReschedule,
    DataCorrection,
    Other,
}

impl ReasonCode {
    pub const ALL: [Self; 5] = [
        Self::ClientRequest,
        Self::RegulatoryChange,
        Self::InternalReschedule,
        Self::DataCorrection,
        Self::Other,
    ];

    /// Numeric code as stored in the audit trail.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::ClientRequest => 1,
            Self::RegulatoryChange => 2,
            Self::InternalReschedule => 3,
            Self::DataCorrection => 4,
            Self::Other => 5,
        }
    }

    /// Resolve a numeric code.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for `0` (unset) and unknown codes.
    pub fn from_code(code: u8) -> Result<Self, CoreError> {
        match code {
            0 => Err(CoreError::Validation("a reason code is required".into())),
            1 => Ok(Self::ClientRequest),
            2 => Ok(Self::RegulatoryChange),
            3 => Ok(Self::InternalReschedule),
            4 => Ok(Self::DataCorrection),
            5 => Ok(Self::Other),
            other => Err(CoreError::Validation(format!("unknown reason code {other}"))),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ClientRequest => "client_request",
            Self::RegulatoryChange => "regulatory_change",
            Self::InternalReschedule => "internal_reschedule",
            Self::DataCorrection => "data_correction",
            Self::Other => "other",
        }
    }
}

impl TryFrom<u8> for ReasonCode {
    type Error = CoreError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<ReasonCode> for u8 {
    fn from(reason: ReasonCode) -> Self {
        reason.code()
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl JsonSchema for ReasonCode {
    fn schema_name() -> Cow<'static, str> {
        "ReasonCode".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "type": "integer",
            "minimum": 1,
            "maximum": 5
        })
    }
}

// ---------------------------------------------------------------------------
// EditField / AuditField
// ---------------------------------------------------------------------------

/// Fields of a milestone instance that can be staged in a change-set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EditField {
    DeadlineDate,
    DeadlineTime,
}

impl EditField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeadlineDate => "deadline_date",
            Self::DeadlineTime => "deadline_time",
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field name recorded on an audit record.
///
/// `NoChanges` is the sentinel for an instance saved without any difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditField {
    DeadlineDate,
    DeadlineTime,
    NoChanges,
}

impl AuditField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeadlineDate => "deadline_date",
            Self::DeadlineTime => "deadline_time",
            Self::NoChanges => "no_changes",
        }
    }
}

impl From<EditField> for AuditField {
    fn from(field: EditField) -> Self {
        match field {
            EditField::DeadlineDate => Self::DeadlineDate,
            EditField::DeadlineTime => Self::DeadlineTime,
        }
    }
}

impl fmt::Display for AuditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
