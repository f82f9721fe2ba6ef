//! # hito-core
//!
//! Core types, calendar values, and error types for Hitos.
//!
//! This crate provides the foundational types shared across all Hitos crates:
//! - Entity structs for the calendar domain (templates, instances, completions, audit)
//! - Closed enums for lifecycle status, display categories, and reason codes
//! - Calendar value helpers (periods, minute-normalised deadline times)
//! - The temporal status classifier
//! - Cross-cutting error types
//! - Acting-user identity

pub mod calendar;
pub mod classify;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
