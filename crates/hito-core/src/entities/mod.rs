//! Entity structs for the milestone calendar domain.
//!
//! Reference data (templates, process links, client-process instances) is
//! read-only here. `MilestoneInstance` is the one mutable entity; `AuditRecord`
//! is append-only. All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod audit;
mod completion;
mod instance;
mod process;
mod template;

pub use audit::AuditRecord;
pub use completion::CompletionRecord;
pub use instance::MilestoneInstance;
pub use process::{ClientProcessInstance, ProcessMilestoneLink, ProcessTemplate};
pub use template::MilestoneTemplate;

/// Identifier of a client.
pub type ClientId = u64;
/// Identifier of a process template.
pub type ProcessTemplateId = u64;
/// Identifier of a milestone template.
pub type MilestoneTemplateId = u64;
/// Identifier of a client-process instance (one client, one process, one period).
pub type ClientProcessId = u64;
/// Identifier of a milestone instance.
pub type InstanceId = u64;
/// Identifier assigned by the store to an audit record.
pub type AuditId = u64;
