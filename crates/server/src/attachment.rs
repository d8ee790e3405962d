//! Attachment MIME type allow-list
//!
//! An allow-list entry is one of:
//! - `*`: every type is accepted
//! - a group such as `image/*`: every type with that top-level part
//! - an exact type such as `application/pdf`
//!
//! Comparison is exact; `Image/PNG` does not match `image/*`.

use serde::Serialize;
use tracing::{debug, warn};

use docmigrate_core::config::ALLOW_ALL_MIME_TYPES;
use docmigrate_core::{Error, Result, TemplateConfig, ATTACHMENT_INVALID_TYPE_ERROR_KEY};

/// Checks detected attachment types against an allow-list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MimeTypeValidator {
    allowed_mime_types: Vec<String>,
}

impl MimeTypeValidator {
    /// Create a validator for `allowed_mime_types`
    pub fn new(allowed_mime_types: Vec<String>) -> Self {
        Self { allowed_mime_types }
    }

    /// Build from the `[attachment]` section of the config
    pub fn from_config(config: &TemplateConfig) -> Self {
        Self::new(config.attachment.allowed_mime_types.clone())
    }

    /// The configured allow-list
    pub fn allowed_mime_types(&self) -> &[String] {
        &self.allowed_mime_types
    }

    /// Whether `mime_type` is allowed
    pub fn is_allowed(&self, mime_type: &str) -> bool {
        let group = mime_group(mime_type);
        self.allowed_mime_types.iter().any(|allowed| {
            allowed == ALLOW_ALL_MIME_TYPES || *allowed == group || allowed == mime_type
        })
    }

    /// Accept or reject `mime_type`
    ///
    /// # Errors
    ///
    /// `InvalidInput` with key `attachment.invalid.type` naming the rejected type.
    pub fn validate_mime_type(&self, mime_type: &str) -> Result<()> {
        if self.is_allowed(mime_type) {
            debug!(target: "docmigrate::attachment", mime_type, "Attachment type accepted");
            return Ok(());
        }

        warn!(
            target: "docmigrate::attachment",
            mime_type,
            allowed = ?self.allowed_mime_types,
            "Attachment type rejected"
        );
        Err(Error::invalid_input_with_key(
            ATTACHMENT_INVALID_TYPE_ERROR_KEY,
            format!("Invalid MIME type: {}", mime_type),
        ))
    }
}

impl Default for MimeTypeValidator {
    fn default() -> Self {
        Self::new(vec![ALLOW_ALL_MIME_TYPES.to_string()])
    }
}

/// Group wildcard of a MIME type: `image/png` -> `image/*`
///
/// A type without `/` falls in the `*` group.
pub fn mime_group(mime_type: &str) -> String {
    match mime_type.find('/') {
        Some(idx) => format!("{}*", &mime_type[..=idx]),
        None => ALLOW_ALL_MIME_TYPES.to_string(),
    }
}
