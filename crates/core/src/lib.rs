//! Core types and traits for docmigrate
//!
//! This crate defines the foundational types used throughout the workspace:
//! - DocumentReference / DataServicesDocument / Locale: document identity and shape
//! - JSON types: JsonValue, JsonPath and the path operations used by migrations
//! - Events: document-load and content-type-detected notifications
//! - Traits: the repository, service and listener seams of the document platform
//! - Error: the workspace error type
//! - Config: `docmigrate.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod events;
pub mod json;
pub mod traits;
pub mod types;

pub use config::{AttachmentConfig, TemplateConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result, ATTACHMENT_INVALID_TYPE_ERROR_KEY};
pub use events::{ContentTypeDetectedEvent, DocumentAfterRepositoryLoadEvent};
pub use json::{
    delete_at_path, get_at_path, get_at_path_mut, JsonPath, JsonValue, LimitError,
    PathParseError, MAX_DOCUMENT_SIZE, MAX_NESTING_DEPTH, MAX_PATH_LENGTH,
};
pub use traits::{
    ContentTypeListener, DocumentLoadListener, DocumentRepository, DocumentService, UnitOfWork,
};
pub use types::{DataServicesDocument, DocumentReference, Locale};
