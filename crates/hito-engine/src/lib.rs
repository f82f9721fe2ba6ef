//! # hito-engine
//!
//! The client milestone calendar engine.
//!
//! Holds the in-memory calendar of one client and period, and mediates every
//! mutation against the external record store:
//! - [`changes`]: staged deadline edits diffed against persisted values
//! - [`audit`]: immutable audit records for each committed field change
//! - [`cascade`]: template-wide disable-from-date operations
//! - [`pipeline`]: filter, sort and paginate the visible calendar
//! - [`service`]: `CalendarService`, which ties the above to a [`store::MilestoneStore`]
//!
//! The record store is an external collaborator; [`memory::InMemoryStore`]
//! implements it over a serialisable snapshot for tests and the CLI.

pub mod audit;
pub mod cascade;
pub mod catalog;
pub mod changes;
pub mod error;
pub mod memory;
pub mod outcome;
pub mod pipeline;
pub mod row;
pub mod service;
pub mod store;
pub mod text;
pub mod updates;

#[cfg(test)]
mod test_support;

pub use error::{EngineError, StoreError};
pub use service::CalendarService;
