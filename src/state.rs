//! Shared application state for all routes.

use crate::store::ResourceStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// The only state shared between requests; coordination is left to the store.
    pub store: Arc<dyn ResourceStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        AppState { store }
    }
}
