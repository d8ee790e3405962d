//! Person document migration
//!
//! Step `202306.1.1` removes `/Person/PersonalData/PlaceOfBirth` from every
//! `Person_DM` document. The field is stripped lazily on load while the guard
//! is active, and the bulk task persists the stripped content for every stored
//! Person document inside one store transaction.

use std::sync::Arc;

use tracing::info;

use docmigrate_core::{
    DocumentLoadListener, DocumentRepository, DocumentService, Error, Locale, Result, UnitOfWork,
};

use crate::bulk::{migrate_all, MigrationReport};
use crate::field_removal::FieldRemovalMigrator;
use crate::guard::MigrationGuard;
use crate::step::{MigrationStep, MigrationTask};

/// Model whose documents are migrated
pub const MODEL_TO_MIGRATE: &str = "Person_DM";

/// Field removed from Person documents
pub const REMOVED_FIELD_PATH: &str = "/Person/PersonalData/PlaceOfBirth";

/// Version of the Person migration step
pub const STEP_VERSION: &str = "202306.1.1";

/// Name of the Person migration step
pub const STEP_NAME: &str = "Data migration of Person Document";

/// Name of the field removal task
pub const TASK_NAME: &str = "Remove the PlaceOfBirth field of document";

/// Removes `PlaceOfBirth` from all Person documents in `S`
pub struct PersonMigration<S> {
    store: Arc<S>,
    migrator: Arc<FieldRemovalMigrator>,
    step: MigrationStep,
    locale: Locale,
}

impl<S> PersonMigration<S>
where
    S: DocumentRepository + DocumentService + UnitOfWork,
{
    /// Create the migration for `store`, gated by `guard`
    ///
    /// The caller must register [`listener`](Self::listener) with the store's
    /// load listeners, otherwise the bulk run rewrites documents unchanged.
    pub fn new(store: Arc<S>, guard: MigrationGuard) -> Result<Self> {
        let migrator = FieldRemovalMigrator::new(MODEL_TO_MIGRATE, REMOVED_FIELD_PATH, guard)?;
        let step = MigrationStep::new(STEP_VERSION, STEP_NAME)
            .map_err(|e| Error::invalid_input(e.to_string()))?;
        Ok(Self {
            store,
            migrator: Arc::new(migrator),
            step,
            locale: Locale::english(),
        })
    }

    /// Use `locale` for the bulk updates instead of English
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// The load rule to register with the repository
    pub fn listener(&self) -> Arc<dyn DocumentLoadListener> {
        self.migrator.clone()
    }

    /// The underlying migrator
    pub fn migrator(&self) -> &FieldRemovalMigrator {
        &self.migrator
    }

    /// Strip `PlaceOfBirth` from every stored Person document
    ///
    /// Runs as one transaction: if any load or update fails, every update of
    /// this run is rolled back and the error returned. Safe to run again.
    pub fn migrate_place_of_birth_field(&self) -> Result<MigrationReport> {
        info!(
            target: "docmigrate::migration",
            step = %self.step,
            task = TASK_NAME,
            "Running migration task"
        );
        let guard = self.migrator.guard();
        let locale = &self.locale;
        self.store.transaction(|store| {
            migrate_all(guard, MODEL_TO_MIGRATE, store, store, locale)
        })
    }
}

impl<S> MigrationTask for PersonMigration<S>
where
    S: DocumentRepository + DocumentService + UnitOfWork,
{
    fn step(&self) -> &MigrationStep {
        &self.step
    }

    fn task_name(&self) -> &str {
        TASK_NAME
    }

    fn run(&self) -> Result<MigrationReport> {
        self.migrate_place_of_birth_field()
    }
}

impl<S> std::fmt::Debug for PersonMigration<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonMigration")
            .field("step", &self.step)
            .field("migrator", &self.migrator)
            .field("locale", &self.locale)
            .finish()
    }
}
