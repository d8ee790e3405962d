//! Shared test utilities for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use docmigrate::{
    DocumentReference, InMemoryDocumentStore, MigrationGuard, PersonMigration, MODEL_TO_MIGRATE,
};
use tempfile::TempDir;

pub const PERSON_WITH_BIRTHPLACE: &str =
    r#"{"Person":{"PersonalData":{"PlaceOfBirth":"Berlin","Name":"X"}}}"#;
pub const PERSON_WITHOUT_BIRTHPLACE: &str = r#"{"Person":{"PersonalData":{"Name":"X"}}}"#;
pub const PERSON_EMPTY: &str = r#"{"Person":{}}"#;

// ============================================================================
// TestStore - store with the Person load rule registered
// ============================================================================

pub struct TestStore {
    pub store: Arc<InMemoryDocumentStore>,
    pub migration: PersonMigration<InMemoryDocumentStore>,
    pub guard: MigrationGuard,
}

impl TestStore {
    pub fn new() -> Self {
        Self::with_store(InMemoryDocumentStore::new())
    }

    pub fn with_store(store: InMemoryDocumentStore) -> Self {
        let store = Arc::new(store);
        let guard = MigrationGuard::new();
        let migration = PersonMigration::new(store.clone(), guard.clone()).unwrap();
        store.register_load_listener(migration.listener());
        Self {
            store,
            migration,
            guard,
        }
    }

    pub fn person(&self, content: &str) -> DocumentReference {
        self.store.create(MODEL_TO_MIGRATE, content).unwrap()
    }

    pub fn raw(&self, reference: &DocumentReference) -> String {
        self.store.raw_content(reference).unwrap()
    }
}

// ============================================================================
// TempSnapshot - snapshot file in a temp directory
// ============================================================================

pub struct TempSnapshot {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TempSnapshot {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.json");
        Self { dir, path }
    }
}
