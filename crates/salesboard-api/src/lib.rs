//! JSON REST API for the salesboard dashboard.
//!
//! Exposes an axum [`Router`] backed by any
//! [`salesboard_core::store::SaleStore`]. Transport concerns (TLS, CORS,
//! request tracing) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", salesboard_api::api_router(state))
//! ```

pub mod error;
pub mod options;
pub mod sales;

use std::sync::Arc;

use axum::{Router, routing::get};
use salesboard_core::store::SaleStore;

use options::FilterOptionsCache;

pub use error::ApiError;

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S: SaleStore> {
  pub store:          Arc<S>,
  pub filter_options: Arc<FilterOptionsCache>,
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: SaleStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/sales", get(sales::handler::<S>))
    .route("/filter-options", get(options::handler::<S>))
    .with_state(state)
}
