//! Attachment event handling

use docmigrate_core::{ContentTypeDetectedEvent, ContentTypeListener, Result};

use crate::attachment::MimeTypeValidator;

/// Rejects attachments whose detected content type is not allowed
#[derive(Debug, Clone, Default)]
pub struct AttachmentEventListener {
    validator: MimeTypeValidator,
}

impl AttachmentEventListener {
    /// Create a listener validating with `validator`
    pub fn new(validator: MimeTypeValidator) -> Self {
        Self { validator }
    }

    /// The validator in use
    pub fn validator(&self) -> &MimeTypeValidator {
        &self.validator
    }
}

impl ContentTypeListener for AttachmentEventListener {
    fn on_content_type_detected(&self, event: &ContentTypeDetectedEvent) -> Result<()> {
        self.validator.validate_mime_type(event.detected_mime_type())
    }
}
