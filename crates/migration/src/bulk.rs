//! Bulk rewrite of every stored document of one model
//!
//! The bulk task does not edit content itself. It turns the guard on, loads
//! each matching document (which runs the lazy load rules) and writes the
//! loaded content straight back, persisting whatever the rules changed.

use serde::Serialize;
use tracing::{debug, info};

use docmigrate_core::{DocumentRepository, DocumentService, Locale, Result};

use crate::guard::MigrationGuard;

/// Outcome of one bulk run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Model that was scanned
    pub model: String,
    /// References returned by the repository
    pub scanned: usize,
    /// Documents written back
    pub updated: usize,
    /// References whose document could not be loaded
    pub missing: usize,
}

impl MigrationReport {
    fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            scanned: 0,
            updated: 0,
            missing: 0,
        }
    }
}

/// Load and re-save every document of `model_name` with `guard` active
///
/// The guard is released on every exit path. The first repository or service
/// error stops the scan and is returned; updates already made are not undone
/// here (run inside [`UnitOfWork::transaction`](docmigrate_core::UnitOfWork)
/// for that).
pub fn migrate_all(
    guard: &MigrationGuard,
    model_name: &str,
    repository: &dyn DocumentRepository,
    service: &dyn DocumentService,
    locale: &Locale,
) -> Result<MigrationReport> {
    let _scope = guard.activate();
    let mut report = MigrationReport::new(model_name);

    let references = repository.find_all_doc_refs_for_model(model_name)?;
    info!(
        target: "docmigrate::migration",
        model = model_name,
        count = references.len(),
        "Starting bulk migration"
    );

    for reference in &references {
        report.scanned += 1;
        let document = match repository.find_by_reference(reference)? {
            Some(document) => document,
            None => {
                debug!(
                    target: "docmigrate::migration",
                    reference = %reference,
                    "Document vanished before load, skipping"
                );
                report.missing += 1;
                continue;
            }
        };

        service.update(reference, &document.kernel_content, locale)?;
        report.updated += 1;
    }

    info!(
        target: "docmigrate::migration",
        model = %report.model,
        scanned = report.scanned,
        updated = report.updated,
        missing = report.missing,
        "Bulk migration finished"
    );
    Ok(report)
}
