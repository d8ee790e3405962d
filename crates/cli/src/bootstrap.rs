//! Bootstrap actions behind the subcommands.
//!
//! Each action returns its outcome instead of printing, so `main` owns all
//! output and exit codes.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use docmigrate_core::{ContentTypeDetectedEvent, ContentTypeListener, TemplateConfig};
use docmigrate_migration::{
    MigrationGuard, MigrationReport, MigrationStep, MigrationTask, PersonMigration,
};
use docmigrate_server::{AttachmentEventListener, MimeTypeValidator};
use docmigrate_storage::InMemoryDocumentStore;

/// Result of `init`
#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub step: MigrationStep,
    pub report: MigrationReport,
    /// Whether the snapshot file was rewritten
    pub written: bool,
}

/// Migrate the documents in `data` and write them back unless `dry_run`.
pub fn init_snapshot(config: &TemplateConfig, data: &Path, dry_run: bool) -> Result<InitOutcome> {
    let store = Arc::new(
        InMemoryDocumentStore::from_snapshot_file(data)
            .with_context(|| format!("loading snapshot {}", data.display()))?,
    );
    info!(
        target: "docmigrate::cli",
        path = %data.display(),
        documents = store.len(),
        "Snapshot loaded"
    );

    let migration = PersonMigration::new(store.clone(), MigrationGuard::new())?
        .with_locale(config.locale());
    store.register_load_listener(migration.listener());

    let report = migration
        .run()
        .with_context(|| format!("running {}", migration.step()))?;

    if !dry_run {
        store
            .export_snapshot(data)
            .with_context(|| format!("writing snapshot {}", data.display()))?;
    }

    Ok(InitOutcome {
        step: migration.step().clone(),
        report,
        written: !dry_run,
    })
}

/// Validate `mime_type` against the configured allow-list.
pub fn check_mime(config: &TemplateConfig, mime_type: &str) -> docmigrate_core::Result<()> {
    let listener = AttachmentEventListener::new(MimeTypeValidator::from_config(config));
    listener.on_content_type_detected(&ContentTypeDetectedEvent::new(mime_type))
}

/// Exit code for a MIME check: 0 accepted, 1 rejected.
pub fn mime_exit_code(result: &docmigrate_core::Result<()>) -> i32 {
    if result.is_ok() {
        0
    } else {
        1
    }
}

/// Write the default config to `path` unless a file is already there.
///
/// Returns whether a file was created.
pub fn init_config(path: &Path) -> Result<bool> {
    let existed = path.exists();
    TemplateConfig::write_default_if_missing(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(!existed)
}
