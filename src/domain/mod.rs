//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep persisted documents and report structs in one place.
//! - Make JSON output and on-disk schema changes explicit and reviewable.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `PackageInfo` and `StatsDocument` are the on-disk shape of the monthly
//! statistics files; changes here affect every previously written period file.

pub mod models;
