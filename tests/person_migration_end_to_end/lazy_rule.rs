//! Load-time behaviour of the Person field-removal rule

use crate::common::*;
use docmigrate::{DocumentReference, DocumentRepository, MODEL_TO_MIGRATE};

#[test]
fn guard_inactive_load_returns_stored_content() {
    let t = TestStore::new();
    let person = t.person(PERSON_WITH_BIRTHPLACE);

    let loaded = t.store.find_by_reference(&person).unwrap().unwrap();

    assert_eq!(loaded.kernel_content, PERSON_WITH_BIRTHPLACE);
}

#[test]
fn guard_active_load_strips_birthplace() {
    let t = TestStore::new();
    let person = t.person(PERSON_WITH_BIRTHPLACE);

    let _scope = t.guard.activate();
    let loaded = t.store.find_by_reference(&person).unwrap().unwrap();

    assert_eq!(loaded.kernel_content, PERSON_WITHOUT_BIRTHPLACE);
    assert_eq!(t.raw(&person), PERSON_WITH_BIRTHPLACE);
}

#[test]
fn guard_active_load_of_person_without_personal_data() {
    let t = TestStore::new();
    let person = t.person(PERSON_EMPTY);

    let _scope = t.guard.activate();
    let loaded = t.store.find_by_reference(&person).unwrap().unwrap();

    assert_eq!(loaded.kernel_content, PERSON_EMPTY);
}

#[test]
fn guard_active_load_of_other_model_is_untouched() {
    let t = TestStore::new();
    let address = t.store.create("Address_DM", PERSON_WITH_BIRTHPLACE).unwrap();

    let _scope = t.guard.activate();
    let loaded = t.store.find_by_reference(&address).unwrap().unwrap();

    assert_eq!(loaded.kernel_content, PERSON_WITH_BIRTHPLACE);
}

#[test]
fn load_rule_matches_model_ignoring_case() {
    let t = TestStore::new();
    let lower = t.store.create("person_dm", PERSON_WITH_BIRTHPLACE).unwrap();

    let _scope = t.guard.activate();
    let loaded = t.store.find_by_reference(&lower).unwrap().unwrap();

    assert_eq!(loaded.kernel_content, PERSON_WITHOUT_BIRTHPLACE);
}

#[test]
fn unknown_reference_loads_nothing() {
    let t = TestStore::new();
    let _scope = t.guard.activate();

    let loaded = t
        .store
        .find_by_reference(&DocumentReference::new(MODEL_TO_MIGRATE))
        .unwrap();

    assert!(loaded.is_none());
}
