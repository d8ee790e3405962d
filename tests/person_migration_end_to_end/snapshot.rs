//! The init bootstrap cycle: import, migrate, export

use crate::common::*;
use docmigrate::{DocumentReference, InMemoryDocumentStore, StoreSnapshot};

#[test]
fn migrated_snapshot_round_trips_through_disk() {
    let snap = TempSnapshot::new();
    let (person, address) = {
        let t = TestStore::new();
        let person = t.person(PERSON_WITH_BIRTHPLACE);
        let address = t.store.create("Address_DM", PERSON_WITH_BIRTHPLACE).unwrap();
        t.store.export_snapshot(&snap.path).unwrap();
        (person, address)
    };

    let t = TestStore::with_store(InMemoryDocumentStore::from_snapshot_file(&snap.path).unwrap());
    let report = t.migration.migrate_place_of_birth_field().unwrap();
    t.store.export_snapshot(&snap.path).unwrap();

    assert_eq!(report.updated, 1);
    let reloaded = InMemoryDocumentStore::from_snapshot_file(&snap.path).unwrap();
    assert_eq!(
        reloaded.raw_content(&person).unwrap(),
        PERSON_WITHOUT_BIRTHPLACE
    );
    assert_eq!(
        reloaded.raw_content(&address).unwrap(),
        PERSON_WITH_BIRTHPLACE
    );
}

#[test]
fn snapshot_file_is_plain_json() {
    let snap = TempSnapshot::new();
    let t = TestStore::new();
    let person: DocumentReference = t.person(PERSON_WITH_BIRTHPLACE);
    t.migration.migrate_place_of_birth_field().unwrap();
    t.store.export_snapshot(&snap.path).unwrap();

    let text = std::fs::read_to_string(&snap.path).unwrap();
    let parsed: StoreSnapshot = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed.documents.len(), 1);
    assert_eq!(parsed.documents[0].reference, person);
    assert_eq!(parsed.documents[0].content, PERSON_WITHOUT_BIRTHPLACE);
    assert_eq!(parsed.documents[0].version, 2);
    assert!(!snap.dir.path().join("documents.json.tmp").exists());
}
