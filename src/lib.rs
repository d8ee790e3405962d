//! docmigrate - guarded, lazy document-field migrations
//!
//! Removes deprecated fields from JSON documents held by a data services
//! document platform. A field is stripped lazily whenever a matching document
//! is loaded while a migration guard is active; a bulk task loads and re-saves
//! every document of the model inside one transaction.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use docmigrate::{InMemoryDocumentStore, MigrationGuard, PersonMigration};
//!
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let migration = PersonMigration::new(store.clone(), MigrationGuard::new())?;
//! store.register_load_listener(migration.listener());
//!
//! let report = migration.migrate_place_of_birth_field()?;
//! ```
//!
//! # Architecture
//!
//! - [`docmigrate_core`]: document types, JSON paths, platform traits, errors, config
//! - [`docmigrate_storage`]: in-memory reference store with load listeners and snapshots
//! - [`docmigrate_migration`]: guard, field-removal rule, bulk task, Person migration
//! - [`docmigrate_server`]: attachment MIME type allow-list

pub use docmigrate_core::*;
pub use docmigrate_migration::{
    migrate_all, FieldRemovalMigrator, GuardScope, GuardState, MigrationGuard, MigrationReport,
    MigrationStep, MigrationTask, MigrationVersion, PersonMigration, MODEL_TO_MIGRATE,
    REMOVED_FIELD_PATH,
};
pub use docmigrate_server::{AttachmentEventListener, MimeTypeValidator};
pub use docmigrate_storage::{InMemoryDocumentStore, StoreSnapshot, StoredDocument};
