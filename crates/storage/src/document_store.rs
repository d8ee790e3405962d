//! InMemoryDocumentStore: reference implementation of the document platform
//!
//! This module implements the repository and service traits using:
//! - `BTreeMap<DocumentReference, StoredDocument>` for ordered storage
//! - `parking_lot::RwLock` for thread-safe access
//! - a load-listener registry dispatched on every `find_by_reference`
//!
//! # Design Notes
//!
//! - **Content is text**: documents are stored exactly as written, so a load
//!   that no listener touches returns the stored bytes unchanged
//! - **Listeners run outside the data lock**: a listener may load other documents
//! - **Closure transactions**: `transaction` serializes against other
//!   transactions and restores the pre-transaction state when the closure
//!   fails or panics. Single-operation writes from other threads are not
//!   isolated from it.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use docmigrate_core::{
    DataServicesDocument, DocumentAfterRepositoryLoadEvent, DocumentLoadListener,
    DocumentReference, DocumentRepository, DocumentService, Error, JsonValue, Locale, Result,
    UnitOfWork,
};

use crate::listeners::LoadListenerRegistry;

/// A document as physically stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Reference of the document
    pub reference: DocumentReference,
    /// JSON text, exactly as last written
    pub content: String,
    /// Document version (starts at 1, increments on every update)
    #[serde(default = "initial_version")]
    pub version: u64,
    /// Creation time
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Time of the last write
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Locale of the last write
    #[serde(default)]
    pub last_locale: Locale,
}

fn initial_version() -> u64 {
    1
}

impl StoredDocument {
    /// Create a version-1 document
    pub fn new(reference: DocumentReference, content: String, locale: Locale) -> Self {
        let now = Utc::now();
        Self {
            reference,
            content,
            version: initial_version(),
            created_at: now,
            updated_at: now,
            last_locale: locale,
        }
    }

    /// Replace the content, bump the version and timestamp
    fn touch(&mut self, content: String, locale: &Locale) {
        self.content = content;
        self.version += 1;
        self.updated_at = Utc::now();
        self.last_locale = locale.clone();
    }
}

/// Parse and limit-check document content
///
/// Malformed JSON is a `Parse` error; limit violations are `InvalidInput`.
pub fn validate_content(content: &str) -> Result<()> {
    let value: JsonValue = content.parse()?;
    value
        .validate()
        .map_err(|e| Error::invalid_input(e.to_string()))
}

/// Thread-safe in-memory document store
///
/// Implements [`DocumentRepository`] and [`DocumentService`].
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<BTreeMap<DocumentReference, StoredDocument>>>,
    listeners: LoadListenerRegistry,
    txn_lock: Mutex<()>,
    /// Total number of successful updates, for diagnostics
    update_count: AtomicU64,
}

impl InMemoryDocumentStore {
    /// Create an empty store with no listeners
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(BTreeMap::new())),
            listeners: LoadListenerRegistry::new(),
            txn_lock: Mutex::new(()),
            update_count: AtomicU64::new(0),
        }
    }

    /// Register a listener for document loads
    pub fn register_load_listener(&self, listener: Arc<dyn DocumentLoadListener>) {
        self.listeners.register(listener);
    }

    /// Remove a listener registered with [`register_load_listener`](Self::register_load_listener)
    pub fn unregister_load_listener(&self, listener: &Arc<dyn DocumentLoadListener>) {
        self.listeners.unregister(listener);
    }

    /// Store a new document of `model_name`
    ///
    /// # Errors
    ///
    /// `Parse` if the content is not JSON, `InvalidInput` if it exceeds limits.
    pub fn create(&self, model_name: &str, content: impl Into<String>) -> Result<DocumentReference> {
        let content = content.into();
        validate_content(&content)?;

        let reference = DocumentReference::new(model_name);
        let doc = StoredDocument::new(reference.clone(), content, Locale::default());
        self.documents.write().insert(reference.clone(), doc);

        debug!(target: "docmigrate::store", reference = %reference, "Document created");
        Ok(reference)
    }

    /// Insert or replace a batch of stored documents as-is
    ///
    /// Every document is validated before any is inserted, so a rejected
    /// batch leaves the store untouched. Returns the number inserted.
    pub fn put_stored_all(&self, docs: Vec<StoredDocument>) -> Result<usize> {
        for doc in &docs {
            validate_content(&doc.content)?;
        }

        let count = docs.len();
        let mut documents = self.documents.write();
        for doc in docs {
            documents.insert(doc.reference.clone(), doc);
        }
        Ok(count)
    }

    /// Stored content, bypassing load listeners
    pub fn raw_content(&self, reference: &DocumentReference) -> Option<String> {
        self.documents
            .read()
            .get(reference)
            .map(|doc| doc.content.clone())
    }

    /// Stored document metadata and content, bypassing load listeners
    pub fn stored(&self, reference: &DocumentReference) -> Option<StoredDocument> {
        self.documents.read().get(reference).cloned()
    }

    /// All stored documents in reference order
    pub fn all_stored(&self) -> Vec<StoredDocument> {
        self.documents.read().values().cloned().collect()
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Number of successful updates since the store was created
    pub fn update_count(&self) -> u64 {
        self.update_count.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("documents", &self.len())
            .field("listeners", &self.listeners)
            .finish()
    }
}

/// Pre-transaction state, restored on drop unless committed
struct Rollback<'a> {
    store: &'a InMemoryDocumentStore,
    documents: Option<BTreeMap<DocumentReference, StoredDocument>>,
    update_count: u64,
}

impl<'a> Rollback<'a> {
    fn capture(store: &'a InMemoryDocumentStore) -> Self {
        Self {
            store,
            documents: Some(store.documents.read().clone()),
            update_count: store.update_count(),
        }
    }

    fn commit(mut self) {
        self.documents = None;
    }
}

impl Drop for Rollback<'_> {
    fn drop(&mut self) {
        if let Some(before) = self.documents.take() {
            *self.store.documents.write() = before;
            self.store
                .update_count
                .store(self.update_count, Ordering::Relaxed);
            if std::thread::panicking() {
                warn!(target: "docmigrate::store", "Transaction rolled back after panic");
            }
        }
    }
}

impl UnitOfWork for InMemoryDocumentStore {
    /// Run `f` as one unit of work
    ///
    /// Transactions are serialized against each other. If `f` returns an
    /// error or panics, every document and the update counter are restored to
    /// their state before `f` ran.
    fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        let _serial = self.txn_lock.lock();
        let rollback = Rollback::capture(self);
        debug!(target: "docmigrate::store", "Transaction started");

        match f(self) {
            Ok(value) => {
                rollback.commit();
                info!(target: "docmigrate::store", "Transaction committed");
                Ok(value)
            }
            Err(e) => {
                drop(rollback);
                warn!(target: "docmigrate::store", error = %e, "Transaction rolled back");
                Err(e)
            }
        }
    }
}

impl DocumentRepository for InMemoryDocumentStore {
    fn find_all_doc_refs_for_model(&self, model_name: &str) -> Result<Vec<DocumentReference>> {
        Ok(self
            .documents
            .read()
            .keys()
            .filter(|reference| reference.document_model_name == model_name)
            .cloned()
            .collect())
    }

    fn find_by_reference(
        &self,
        reference: &DocumentReference,
    ) -> Result<Option<DataServicesDocument>> {
        let stored = match self.stored(reference) {
            Some(doc) => doc,
            None => return Ok(None),
        };

        let mut event = DocumentAfterRepositoryLoadEvent::new(reference.clone(), stored.content);
        self.listeners.dispatch(&mut event)?;

        Ok(Some(DataServicesDocument {
            reference: stored.reference,
            kernel_content: event.into_content(),
            version: stored.version,
            updated_at: stored.updated_at,
        }))
    }
}

impl DocumentService for InMemoryDocumentStore {
    fn update(&self, reference: &DocumentReference, content: &str, locale: &Locale) -> Result<()> {
        validate_content(content)?;

        let mut documents = self.documents.write();
        let doc = documents
            .get_mut(reference)
            .ok_or_else(|| Error::DocumentNotFound(reference.clone()))?;
        doc.touch(content.to_string(), locale);
        let version = doc.version;
        drop(documents);

        self.update_count.fetch_add(1, Ordering::Relaxed);
        debug!(
            target: "docmigrate::store",
            reference = %reference,
            version,
            locale = %locale,
            "Document updated"
        );
        Ok(())
    }
}
