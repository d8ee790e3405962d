//! Bulk runs of the Person migration

use crate::common::*;
use docmigrate::{DocumentReference, MigrationTask, MODEL_TO_MIGRATE};

#[test]
fn run_migrates_every_person_document() {
    let t = TestStore::new();
    let with: Vec<DocumentReference> = (0..10).map(|_| t.person(PERSON_WITH_BIRTHPLACE)).collect();
    let without = t.person(PERSON_WITHOUT_BIRTHPLACE);
    let empty = t.person(PERSON_EMPTY);

    let report = t.migration.migrate_place_of_birth_field().unwrap();

    assert_eq!(report.model, MODEL_TO_MIGRATE);
    assert_eq!(report.scanned, 12);
    assert_eq!(report.updated, 12);
    assert_eq!(report.missing, 0);
    for reference in &with {
        assert_eq!(t.raw(reference), PERSON_WITHOUT_BIRTHPLACE);
    }
    assert_eq!(t.raw(&without), PERSON_WITHOUT_BIRTHPLACE);
    assert_eq!(t.raw(&empty), PERSON_EMPTY);
    assert!(!t.guard.is_enabled());
}

#[test]
fn every_scanned_document_gets_a_new_version() {
    let t = TestStore::new();
    let person = t.person(PERSON_WITHOUT_BIRTHPLACE);

    t.migration.migrate_place_of_birth_field().unwrap();
    t.migration.migrate_place_of_birth_field().unwrap();

    assert_eq!(t.store.stored(&person).unwrap().version, 3);
    assert_eq!(t.store.update_count(), 2);
}

#[test]
fn second_run_leaves_content_unchanged() {
    let t = TestStore::new();
    let refs: Vec<DocumentReference> = (0..4).map(|_| t.person(PERSON_WITH_BIRTHPLACE)).collect();

    t.migration.run().unwrap();
    let after_first: Vec<String> = refs.iter().map(|r| t.raw(r)).collect();
    t.migration.run().unwrap();
    let after_second: Vec<String> = refs.iter().map(|r| t.raw(r)).collect();

    assert_eq!(after_first, after_second);
}

#[test]
fn plain_loads_after_run_no_longer_strip() {
    let t = TestStore::new();
    t.migration.migrate_place_of_birth_field().unwrap();

    // Written after the run, so it was never migrated
    let late = t.person(PERSON_WITH_BIRTHPLACE);
    let loaded = docmigrate::DocumentRepository::find_by_reference(&*t.store, &late)
        .unwrap()
        .unwrap();

    assert_eq!(loaded.kernel_content, PERSON_WITH_BIRTHPLACE);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn run_removes_every_birthplace_and_keeps_the_rest(
            docs in proptest::collection::vec((any::<bool>(), "[a-zA-Z]{0,10}"), 0..12),
        ) {
            let t = TestStore::new();
            let refs: Vec<(DocumentReference, bool, String)> = docs
                .iter()
                .map(|(with_field, name)| {
                    let content = if *with_field {
                        format!(
                            "{{\"Person\":{{\"PersonalData\":{{\"PlaceOfBirth\":\"B\",\"Name\":\"{}\"}}}}}}",
                            name
                        )
                    } else {
                        format!("{{\"Person\":{{\"PersonalData\":{{\"Name\":\"{}\"}}}}}}", name)
                    };
                    (t.person(&content), *with_field, content)
                })
                .collect();

            let report = t.migration.migrate_place_of_birth_field().unwrap();

            prop_assert_eq!(report.scanned, docs.len());
            for (reference, with_field, original) in &refs {
                let raw = t.raw(reference);
                prop_assert!(!raw.contains("PlaceOfBirth"));
                if !*with_field {
                    prop_assert_eq!(&raw, original);
                }
            }
            prop_assert!(!t.guard.is_enabled());
        }
    }
}
