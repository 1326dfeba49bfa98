//! Shared application state handed to every request handler.

use std::sync::Arc;

use crate::{config::AppConfig, dao::store::DataStore};

/// Cheaply clonable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state storing the persistence handle and configuration.
///
/// The store is injected at construction, which keeps handlers free of global
/// connection state and lets tests spin up an isolated instance per case.
pub struct AppState {
    store: Arc<dyn DataStore>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(store: Arc<dyn DataStore>, config: AppConfig) -> SharedState {
        Arc::new(Self { store, config })
    }

    /// Handle to the score/save store.
    pub fn store(&self) -> Arc<dyn DataStore> {
        Arc::clone(&self.store)
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
