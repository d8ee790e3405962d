//! Document migrations for docmigrate
//!
//! This crate removes deprecated fields from stored documents:
//! - MigrationGuard: shared flag gating lazy load rules, released by RAII scope
//! - FieldRemovalMigrator: load rule stripping one field from one model
//! - migrate_all: bulk load-and-save of every document of a model
//! - MigrationStep / MigrationTask: descriptors for an external harness
//! - PersonMigration: step 202306.1.1, removing `PlaceOfBirth` from `Person_DM`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bulk;
pub mod field_removal;
pub mod guard;
pub mod person;
pub mod step;

pub use bulk::{migrate_all, MigrationReport};
pub use field_removal::FieldRemovalMigrator;
pub use guard::{GuardScope, GuardState, MigrationGuard};
pub use person::{PersonMigration, MODEL_TO_MIGRATE, REMOVED_FIELD_PATH};
pub use step::{MigrationStep, MigrationTask, MigrationVersion, VersionParseError};
