//! Storage layer for docmigrate
//!
//! This crate implements an in-process stand-in for the document platform:
//! - InMemoryDocumentStore: BTreeMap-based document storage with RwLock
//! - LoadListenerRegistry: ordered dispatch of document-load events
//! - Closure transactions with rollback on error
//! - JSON snapshot import/export for the init bootstrap

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document_store;
pub mod listeners;
pub mod snapshot;

pub use document_store::{validate_content, InMemoryDocumentStore, StoredDocument};
pub use listeners::LoadListenerRegistry;
pub use snapshot::{StoreSnapshot, SNAPSHOT_FORMAT_VERSION};
