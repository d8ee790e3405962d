//! Trait definitions for the document platform seams
//!
//! The migration and attachment code only talk to these traits. The storage
//! crate ships an in-memory implementation; a real deployment plugs in the
//! platform's repository and service.

use crate::error::Result;
use crate::events::{ContentTypeDetectedEvent, DocumentAfterRepositoryLoadEvent};
use crate::types::{DataServicesDocument, DocumentReference, Locale};

/// Read access to stored documents
pub trait DocumentRepository: Send + Sync {
    /// All references whose model name equals `model_name`
    fn find_all_doc_refs_for_model(&self, model_name: &str) -> Result<Vec<DocumentReference>>;

    /// Load one document
    ///
    /// Implementations dispatch a [`DocumentAfterRepositoryLoadEvent`] to the
    /// registered load listeners before returning; the returned
    /// `kernel_content` is the content the listeners left behind.
    fn find_by_reference(&self, reference: &DocumentReference)
        -> Result<Option<DataServicesDocument>>;
}

/// Write access to stored documents
pub trait DocumentService: Send + Sync {
    /// Replace a document's content
    fn update(&self, reference: &DocumentReference, content: &str, locale: &Locale) -> Result<()>;
}

/// Receives "document loaded from repository" notifications
///
/// Listeners must decide for themselves whether an event concerns them; the
/// dispatcher delivers every load to every listener.
pub trait DocumentLoadListener: Send + Sync {
    /// Inspect and optionally rewrite the loaded content
    fn on_document_loaded(&self, event: &mut DocumentAfterRepositoryLoadEvent) -> Result<()>;
}

/// Receives "attachment content type detected" notifications
pub trait ContentTypeListener: Send + Sync {
    /// Validate the detected type; an error rejects the attachment
    fn on_content_type_detected(&self, event: &ContentTypeDetectedEvent) -> Result<()>;
}

/// Runs a closure as one transactional unit of work
///
/// If the closure fails, every write it made through `Self` is undone and the
/// error is returned.
pub trait UnitOfWork {
    /// Run `f` inside a transaction
    fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&Self) -> Result<T>;
}
