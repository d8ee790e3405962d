//! JSON snapshot files
//!
//! A snapshot is the full document set of a store written as one JSON file.
//! The init bootstrap reads a snapshot, migrates it and writes it back.
//!
//! Export writes to a sibling temp file and renames it over the target, so a
//! crash mid-write leaves the previous snapshot intact.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use docmigrate_core::{Error, Result};

use crate::document_store::{InMemoryDocumentStore, StoredDocument};

/// Current snapshot format version
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// On-disk snapshot layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Format version, checked on import
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    /// Documents in reference order
    pub documents: Vec<StoredDocument>,
}

fn default_format_version() -> u32 {
    SNAPSHOT_FORMAT_VERSION
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl InMemoryDocumentStore {
    /// Capture every stored document
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            documents: self.all_stored(),
        }
    }

    /// Write a snapshot of the store to `path`
    pub fn export_snapshot(&self, path: &Path) -> Result<()> {
        let snapshot = self.snapshot();
        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let tmp = temp_path_for(path);
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, path)?;

        info!(
            target: "docmigrate::store",
            path = %path.display(),
            documents = snapshot.documents.len(),
            "Snapshot exported"
        );
        Ok(())
    }

    /// Load every document of the snapshot at `path` into the store
    ///
    /// Documents with a reference already present are replaced. Nothing is
    /// imported if any document is invalid. Returns the number of documents
    /// imported.
    pub fn import_snapshot(&self, path: &Path) -> Result<usize> {
        let bytes = std::fs::read(path)?;
        let snapshot: StoreSnapshot = serde_json::from_slice(&bytes).map_err(|e| {
            Error::Serialization(format!(
                "Failed to read snapshot '{}': {}",
                path.display(),
                e
            ))
        })?;

        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(Error::Serialization(format!(
                "Unsupported snapshot format version {} (expected {})",
                snapshot.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        let count = self.put_stored_all(snapshot.documents)?;

        info!(
            target: "docmigrate::store",
            path = %path.display(),
            documents = count,
            "Snapshot imported"
        );
        Ok(count)
    }

    /// Create a store from the snapshot at `path`
    pub fn from_snapshot_file(path: &Path) -> Result<Self> {
        let store = Self::new();
        store.import_snapshot(path)?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmigrate_core::{DocumentReference, DocumentService, Locale};
    use tempfile::TempDir;

    #[test]
    fn test_export_import_preserves_content_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("documents.json");

        let store = InMemoryDocumentStore::new();
        // Non-canonical spacing must survive the round trip
        let content = r#"{ "Person" : { "PersonalData" : { "Name" : "X" } } }"#;
        let reference = store.create("Person_DM", content).unwrap();
        store.update(&reference, content, &Locale::new("de")).unwrap();
        store.export_snapshot(&path).unwrap();

        let restored = InMemoryDocumentStore::from_snapshot_file(&path).unwrap();
        let doc = restored.stored(&reference).unwrap();
        assert_eq!(doc.content, content);
        assert_eq!(doc.version, 2);
        assert_eq!(doc.last_locale, Locale::new("de"));
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_import_minimal_hand_written_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("documents.json");
        std::fs::write(
            &path,
            r#"{"documents":[{"reference":{"document_model_name":"Person_DM","document_id":"00000000-0000-0000-0000-000000000001"},"content":"{\"Person\":{}}"}]}"#,
        )
        .unwrap();

        let store = InMemoryDocumentStore::from_snapshot_file(&path).unwrap();
        let reference =
            DocumentReference::with_id("Person_DM", uuid::Uuid::from_u128(1));
        let doc = store.stored(&reference).unwrap();
        assert_eq!(doc.version, 1);
        assert_eq!(doc.content, r#"{"Person":{}}"#);
    }

    #[test]
    fn test_import_rejects_malformed_document_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("documents.json");
        std::fs::write(
            &path,
            r#"{"documents":[{"reference":{"document_model_name":"Person_DM","document_id":"00000000-0000-0000-0000-000000000001"},"content":"{broken"}]}"#,
        )
        .unwrap();

        let err = InMemoryDocumentStore::from_snapshot_file(&path).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_failed_import_leaves_populated_store_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("documents.json");
        std::fs::write(
            &path,
            r#"{"documents":[
                {"reference":{"document_model_name":"Person_DM","document_id":"00000000-0000-0000-0000-000000000001"},"content":"{\"Person\":{}}"},
                {"reference":{"document_model_name":"Person_DM","document_id":"00000000-0000-0000-0000-000000000002"},"content":"{broken"}
            ]}"#,
        )
        .unwrap();

        let store = InMemoryDocumentStore::new();
        let existing = store.create("Person_DM", "{}").unwrap();

        assert!(store.import_snapshot(&path).is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.raw_content(&existing).unwrap(), "{}");
        let first = DocumentReference::with_id("Person_DM", uuid::Uuid::from_u128(1));
        assert!(store.stored(&first).is_none());
    }

    #[test]
    fn test_import_rejects_unknown_format_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("documents.json");
        std::fs::write(&path, r#"{"format_version":99,"documents":[]}"#).unwrap();

        let err = InMemoryDocumentStore::from_snapshot_file(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported snapshot format version"));
    }

    #[test]
    fn test_import_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = InMemoryDocumentStore::from_snapshot_file(&dir.path().join("nope.json"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
