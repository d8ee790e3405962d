//! Platform events delivered to listeners
//!
//! - DocumentAfterRepositoryLoadEvent: a document was read from the repository;
//!   listeners may replace its content before it reaches the caller
//! - ContentTypeDetectedEvent: an attachment's MIME type was detected

use crate::types::DocumentReference;

/// Fired after a document's content was read from the repository
///
/// The content is mutable: whatever the listeners leave in the event is what
/// the repository hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAfterRepositoryLoadEvent {
    document_reference: DocumentReference,
    document_content: String,
}

impl DocumentAfterRepositoryLoadEvent {
    /// Create a load event for the given document content
    pub fn new(document_reference: DocumentReference, document_content: impl Into<String>) -> Self {
        Self {
            document_reference,
            document_content: document_content.into(),
        }
    }

    /// Reference of the loaded document
    pub fn document_reference(&self) -> &DocumentReference {
        &self.document_reference
    }

    /// Current content
    pub fn document_content(&self) -> &str {
        &self.document_content
    }

    /// Replace the content handed back to the caller
    pub fn set_document_content(&mut self, content: String) {
        self.document_content = content;
    }

    /// Consume the event, returning its final content
    pub fn into_content(self) -> String {
        self.document_content
    }
}

/// Fired when the MIME type of an uploaded attachment has been detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeDetectedEvent {
    detected_mime_type: String,
}

impl ContentTypeDetectedEvent {
    /// Create an event for a detected MIME type
    pub fn new(detected_mime_type: impl Into<String>) -> Self {
        Self {
            detected_mime_type: detected_mime_type.into(),
        }
    }

    /// The detected MIME type (`image/png`, ...)
    pub fn detected_mime_type(&self) -> &str {
        &self.detected_mime_type
    }
}
