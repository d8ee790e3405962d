//! Person Migration End-to-End Tests
//!
//! Cross-crate tests organized by concern:
//! - Lazy rule: load-time behaviour with and without the guard
//! - Bulk: full runs, repeated runs, rollback
//! - Snapshot: the init bootstrap's load, migrate and write cycle

#[path = "../common/mod.rs"]
mod common;

mod bulk;
mod lazy_rule;
mod snapshot;
