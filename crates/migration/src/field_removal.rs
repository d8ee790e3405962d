//! Field removal migrator
//!
//! Removes one deprecated field from documents of one model. The removal runs
//! lazily as a load rule: whenever a matching document is loaded while the
//! guard is active, the field is stripped from the content handed back to the
//! caller. The bulk driver in [`crate::bulk`] loads every matching document and
//! writes the stripped content back.

use std::borrow::Cow;

use tracing::debug;

use docmigrate_core::{
    delete_at_path, get_at_path, DocumentAfterRepositoryLoadEvent, DocumentLoadListener,
    DocumentReference, Error, JsonPath, JsonValue, Result,
};

use crate::guard::MigrationGuard;

/// Strips one field from documents of one model
#[derive(Debug, Clone)]
pub struct FieldRemovalMigrator {
    model_name: String,
    field_path: JsonPath,
    parent_path: JsonPath,
    leaf_name: String,
    guard: MigrationGuard,
}

impl FieldRemovalMigrator {
    /// Create a migrator removing `field_path` from documents of `model_name`
    ///
    /// # Errors
    ///
    /// `InvalidPath` if the path does not parse, exceeds the path length limit
    /// or names the document root.
    pub fn new(
        model_name: impl Into<String>,
        field_path: &str,
        guard: MigrationGuard,
    ) -> Result<Self> {
        let parsed: JsonPath = field_path
            .parse()
            .map_err(|e| Error::InvalidPath(format!("{}: {}", field_path, e)))?;
        parsed
            .validate()
            .map_err(|e| Error::InvalidPath(e.to_string()))?;
        let (parent_path, leaf_name) = parsed
            .split_leaf()
            .ok_or_else(|| Error::InvalidPath("cannot remove the document root".to_string()))?;

        Ok(Self {
            model_name: model_name.into(),
            field_path: parsed,
            parent_path,
            leaf_name,
            guard,
        })
    }

    /// Model whose documents are migrated
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Path of the removed field
    pub fn field_path(&self) -> &JsonPath {
        &self.field_path
    }

    /// The guard gating the load rule
    pub fn guard(&self) -> &MigrationGuard {
        &self.guard
    }

    /// Whether a load of `reference` should be migrated right now
    ///
    /// True only while the guard is active and the model name matches,
    /// ignoring case.
    pub fn applies_to(&self, reference: &DocumentReference) -> bool {
        self.guard.is_enabled() && reference.is_model(&self.model_name)
    }

    /// Remove the field from `content`
    ///
    /// Returns the input unchanged (borrowed, byte-for-byte) when there is
    /// nothing to remove: the field is absent, an ancestor is missing, or the
    /// parent is not an object. Otherwise returns the compact re-serialized
    /// document.
    ///
    /// # Errors
    ///
    /// `Parse` if `content` is not valid JSON.
    pub fn migrate_document<'a>(&self, content: &'a str) -> Result<Cow<'a, str>> {
        let mut root: JsonValue = content.parse()?;

        let has_field = get_at_path(&root, &self.parent_path)
            .and_then(|parent| parent.as_object())
            .map(|parent| parent.contains_key(&self.leaf_name))
            .unwrap_or(false);
        if !has_field {
            return Ok(Cow::Borrowed(content));
        }

        match delete_at_path(&mut root, &self.field_path) {
            Some(_) => Ok(Cow::Owned(root.to_json_string())),
            None => Ok(Cow::Borrowed(content)),
        }
    }
}

impl DocumentLoadListener for FieldRemovalMigrator {
    fn on_document_loaded(&self, event: &mut DocumentAfterRepositoryLoadEvent) -> Result<()> {
        if !self.applies_to(event.document_reference()) {
            return Ok(());
        }

        let migrated = match self.migrate_document(event.document_content())? {
            Cow::Borrowed(_) => None,
            Cow::Owned(rewritten) => Some(rewritten),
        };

        if let Some(rewritten) = migrated {
            debug!(
                target: "docmigrate::migration",
                reference = %event.document_reference(),
                field = %self.field_path,
                "Removed field from loaded document"
            );
            event.set_document_content(rewritten);
        }
        Ok(())
    }
}
