//! Load-listener registry
//!
//! Listeners are delivered every document load in registration order. Each
//! listener sees the content left behind by the previous one.

use std::sync::Arc;

use parking_lot::RwLock;

use docmigrate_core::{DocumentAfterRepositoryLoadEvent, DocumentLoadListener, Result};

/// Ordered set of [`DocumentLoadListener`]s
#[derive(Default)]
pub struct LoadListenerRegistry {
    listeners: RwLock<Vec<Arc<dyn DocumentLoadListener>>>,
}

impl LoadListenerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener
    pub fn register(&self, listener: Arc<dyn DocumentLoadListener>) {
        self.listeners.write().push(listener);
    }

    /// Remove a previously registered listener (compared by pointer)
    pub fn unregister(&self, listener: &Arc<dyn DocumentLoadListener>) {
        self.listeners
            .write()
            .retain(|existing| !Arc::ptr_eq(existing, listener));
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Whether no listener is registered
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Deliver `event` to every listener, stopping at the first error
    ///
    /// The registry lock is not held while listeners run, so a listener may
    /// load other documents.
    pub fn dispatch(&self, event: &mut DocumentAfterRepositoryLoadEvent) -> Result<()> {
        let listeners: Vec<Arc<dyn DocumentLoadListener>> = self.listeners.read().clone();
        for listener in listeners {
            listener.on_document_loaded(event)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for LoadListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}
