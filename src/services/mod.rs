//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `storage.rs` — JSON document load/save + audit log.
//! - `path.rs` — dotted-path resolution and mutation over a JSON document.
//! - `period.rs` — `MM.YYYY` period key derivation.
//! - `stats.rs` — per-period statistics file lifecycle and merge policy.
//! - `fetch.rs` — registry/downloads HTTP client and bounded parallel fetch.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod fetch;
pub mod output;
pub mod path;
pub mod period;
pub mod stats;
pub mod storage;
