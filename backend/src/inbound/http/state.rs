//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without real storage.

use std::sync::Arc;

use crate::domain::ports::{MovieStore, UserStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Watchlist entries.
    pub movies: Arc<dyn MovieStore>,
    /// The administrator record.
    pub users: Arc<dyn UserStore>,
}

impl HttpState {
    /// Bundle the store ports for injection.
    #[must_use]
    pub fn new(movies: Arc<dyn MovieStore>, users: Arc<dyn UserStore>) -> Self {
        Self { movies, users }
    }
}
