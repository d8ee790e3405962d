//! Core document types
//!
//! This module defines the foundational types:
//! - DocumentReference: model name + document id, identifies one stored document
//! - Locale: language tag passed along with document updates
//! - DataServicesDocument: a document as handed back by the repository

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reference to a stored document
///
/// Correlates a stored document with the model it was created from. A
/// DocumentReference is immutable; the store assigns the id on create.
///
/// Ordering is by model name, then document id, so listings are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentReference {
    /// Name of the document model (e.g. `Person_DM`)
    pub document_model_name: String,
    /// Document identifier, unique within the store
    pub document_id: Uuid,
}

impl DocumentReference {
    /// Create a reference with a fresh random id
    pub fn new(document_model_name: impl Into<String>) -> Self {
        Self {
            document_model_name: document_model_name.into(),
            document_id: Uuid::new_v4(),
        }
    }

    /// Create a reference from a known id
    pub fn with_id(document_model_name: impl Into<String>, document_id: Uuid) -> Self {
        Self {
            document_model_name: document_model_name.into(),
            document_id,
        }
    }

    /// Model name of the referenced document
    pub fn model_name(&self) -> &str {
        &self.document_model_name
    }

    /// Case-insensitive model name comparison
    ///
    /// Only ASCII letters are folded; model names are ASCII identifiers.
    pub fn is_model(&self, model_name: &str) -> bool {
        self.document_model_name.eq_ignore_ascii_case(model_name)
    }
}

impl fmt::Display for DocumentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.document_model_name, self.document_id)
    }
}

/// Language tag passed to document updates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a language tag (`en`, `de-DE`, ...)
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// English, used by migrations
    pub fn english() -> Self {
        Self("en".to_string())
    }

    /// The language tag
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document loaded from the repository
///
/// `kernel_content` is the JSON text after all load listeners have run, so it
/// may differ from what is physically stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataServicesDocument {
    /// Reference of the loaded document
    pub reference: DocumentReference,
    /// JSON content of the document
    pub kernel_content: String,
    /// Document version (starts at 1, increments on every update)
    pub version: u64,
    /// Time of the last write
    pub updated_at: DateTime<Utc>,
}

impl DataServicesDocument {
    /// The document's content
    pub fn kernel_document(&self) -> &str {
        &self.kernel_content
    }
}
