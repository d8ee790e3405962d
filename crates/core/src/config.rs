//! Application configuration via `docmigrate.toml`
//!
//! Both bootstraps read the same file. A missing file means defaults, which
//! accept every attachment type and migrate with English as the update locale.

use crate::error::{Error, Result};
use crate::types::Locale;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "docmigrate.toml";

/// Wildcard entry that allows every MIME type.
pub const ALLOW_ALL_MIME_TYPES: &str = "*";

/// Attachment settings, persisted under `[attachment]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttachmentConfig {
    /// Allowed MIME types: `"*"`, a group such as `"image/*"`, or an exact type
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![ALLOW_ALL_MIME_TYPES.to_string()]
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

/// Application configuration loaded from `docmigrate.toml`.
///
/// # Example
///
/// ```toml
/// locale = "en"
///
/// [attachment]
/// allowed_mime_types = ["image/*", "application/pdf"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Locale passed to document updates issued by migrations
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Attachment upload settings
    #[serde(default)]
    pub attachment: AttachmentConfig,
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            attachment: AttachmentConfig::default(),
        }
    }
}

impl TemplateConfig {
    /// Locale for migration updates
    pub fn locale(&self) -> Locale {
        Locale::new(self.locale.clone())
    }

    /// Check values serde cannot express
    ///
    /// # Errors
    ///
    /// Returns an error if the allow-list is empty or contains a blank entry,
    /// or if the locale is blank.
    pub fn validate(&self) -> Result<()> {
        if self.locale.trim().is_empty() {
            return Err(Error::config("locale must not be empty"));
        }
        if self.attachment.allowed_mime_types.is_empty() {
            return Err(Error::config(
                "attachment.allowed_mime_types must not be empty; use [\"*\"] to allow everything",
            ));
        }
        if let Some(blank) = self
            .attachment
            .allowed_mime_types
            .iter()
            .find(|t| t.trim().is_empty())
        {
            return Err(Error::config(format!(
                "attachment.allowed_mime_types contains a blank entry: {:?}",
                blank
            )));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# docmigrate configuration
#
# Locale passed to document updates issued by migrations (default: "en")
locale = "en"

[attachment]
# Allowed attachment MIME types.
#   "*"          = allow everything (default)
#   "image/*"    = allow a whole group
#   "text/plain" = allow one exact type
allowed_mime_types = ["*"]
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: TemplateConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read config from `path` if the file exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
