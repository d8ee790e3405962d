//! Person migration against the in-memory store
//!
//! Exercises the full load-rule + bulk path: selectivity on model and guard,
//! repeated runs, and rollback when a load fails midway.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use docmigrate_core::{
    DocumentAfterRepositoryLoadEvent, DocumentLoadListener, DocumentReference, DocumentRepository,
    Error, Result,
};
use docmigrate_migration::{MigrationGuard, PersonMigration, MODEL_TO_MIGRATE};
use docmigrate_storage::InMemoryDocumentStore;

const WITH_FIELD: &str = r#"{"Person":{"PersonalData":{"PlaceOfBirth":"Berlin","Name":"X"}}}"#;
const WITHOUT_FIELD: &str = r#"{"Person":{"PersonalData":{"Name":"X"}}}"#;

fn setup() -> (
    Arc<InMemoryDocumentStore>,
    PersonMigration<InMemoryDocumentStore>,
    MigrationGuard,
) {
    let store = Arc::new(InMemoryDocumentStore::new());
    let guard = MigrationGuard::new();
    let migration = PersonMigration::new(store.clone(), guard.clone()).unwrap();
    store.register_load_listener(migration.listener());
    (store, migration, guard)
}

/// Fails the `n`-th load it sees (0-based), counting every load
struct FailNthLoad {
    n: usize,
    seen: AtomicUsize,
}

impl DocumentLoadListener for FailNthLoad {
    fn on_document_loaded(&self, _event: &mut DocumentAfterRepositoryLoadEvent) -> Result<()> {
        if self.seen.fetch_add(1, Ordering::SeqCst) == self.n {
            return Err(Error::storage("simulated load failure"));
        }
        Ok(())
    }
}

#[test]
fn plain_loads_do_not_migrate() {
    let (store, _migration, guard) = setup();
    let person = store.create(MODEL_TO_MIGRATE, WITH_FIELD).unwrap();

    let loaded = store.find_by_reference(&person).unwrap().unwrap();

    assert!(!guard.is_enabled());
    assert_eq!(loaded.kernel_content, WITH_FIELD);
    assert_eq!(store.raw_content(&person).unwrap(), WITH_FIELD);
}

#[test]
fn loads_while_guard_active_strip_field_without_persisting() {
    let (store, _migration, guard) = setup();
    let person = store.create(MODEL_TO_MIGRATE, WITH_FIELD).unwrap();

    let loaded = {
        let _scope = guard.activate();
        store.find_by_reference(&person).unwrap().unwrap()
    };

    assert_eq!(loaded.kernel_content, WITHOUT_FIELD);
    assert_eq!(store.raw_content(&person).unwrap(), WITH_FIELD);
}

#[test]
fn bulk_run_migrates_only_person_documents() {
    let (store, migration, guard) = setup();
    let people: Vec<DocumentReference> = (0..5)
        .map(|_| store.create(MODEL_TO_MIGRATE, WITH_FIELD).unwrap())
        .collect();
    let address = store.create("Address_DM", WITH_FIELD).unwrap();
    let lower = store.create("person_dm", WITH_FIELD).unwrap();

    let report = migration.migrate_place_of_birth_field().unwrap();

    assert_eq!(report.scanned, 5);
    assert_eq!(report.updated, 5);
    assert_eq!(report.missing, 0);
    for person in &people {
        assert_eq!(store.raw_content(person).unwrap(), WITHOUT_FIELD);
        assert_eq!(store.stored(person).unwrap().version, 2);
    }
    assert_eq!(store.raw_content(&address).unwrap(), WITH_FIELD);
    // Listing is exact-match, so a differently cased model is never scanned
    assert_eq!(store.raw_content(&lower).unwrap(), WITH_FIELD);
    assert!(!guard.is_enabled());
}

#[test]
fn documents_without_field_are_rewritten_byte_identical() {
    let (store, migration, _guard) = setup();
    let pretty = "{ \"Person\": { \"PersonalData\": { \"Name\": \"X\" } } }";
    let person = store.create(MODEL_TO_MIGRATE, pretty).unwrap();

    migration.migrate_place_of_birth_field().unwrap();

    assert_eq!(store.raw_content(&person).unwrap(), pretty);
}

#[test]
fn repeated_runs_are_stable() {
    let (store, migration, _guard) = setup();
    let person = store.create(MODEL_TO_MIGRATE, WITH_FIELD).unwrap();

    let first = migration.migrate_place_of_birth_field().unwrap();
    let after_first = store.raw_content(&person).unwrap();
    let second = migration.migrate_place_of_birth_field().unwrap();

    assert_eq!(first.updated, second.updated);
    assert_eq!(store.raw_content(&person).unwrap(), after_first);
    assert_eq!(after_first, WITHOUT_FIELD);
}

#[test]
fn failed_run_rolls_back_and_releases_guard() {
    let (store, migration, guard) = setup();
    let people: Vec<DocumentReference> = (0..3)
        .map(|_| store.create(MODEL_TO_MIGRATE, WITH_FIELD).unwrap())
        .collect();
    store.register_load_listener(Arc::new(FailNthLoad {
        n: 2,
        seen: AtomicUsize::new(0),
    }));

    let err = migration.migrate_place_of_birth_field().unwrap_err();

    assert!(matches!(err, Error::Storage(_)));
    assert!(!guard.is_enabled());
    for person in &people {
        assert_eq!(store.raw_content(person).unwrap(), WITH_FIELD);
        assert_eq!(store.stored(person).unwrap().version, 1);
    }
}

#[test]
fn bulk_run_persists_large_numbers_exactly() {
    let (store, migration, _guard) = setup();
    let person = store
        .create(
            MODEL_TO_MIGRATE,
            r#"{"Person":{"PersonalData":{"PlaceOfBirth":"Berlin","TaxId":123456789012345678901234567890,"Balance":1234.56789012345678901234}}}"#,
        )
        .unwrap();

    migration.migrate_place_of_birth_field().unwrap();

    assert_eq!(
        store.raw_content(&person).unwrap(),
        r#"{"Person":{"PersonalData":{"TaxId":123456789012345678901234567890,"Balance":1234.56789012345678901234}}}"#
    );
}
