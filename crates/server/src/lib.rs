//! Attachment handling for docmigrate
//!
//! This crate validates uploaded attachments against the configured allow-list:
//! - MimeTypeValidator: `*`, group (`image/*`) and exact entries
//! - AttachmentEventListener: rejects disallowed types on content-type detection

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attachment;
pub mod event;

pub use attachment::{mime_group, MimeTypeValidator};
pub use event::AttachmentEventListener;
