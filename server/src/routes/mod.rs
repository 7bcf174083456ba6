//! HTTP route definitions.

mod contacts;
mod health;

pub use contacts::PAGINATION_HEADER;

use crate::AppState;
use axum::Router;

/// Create all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(contacts::routes())
}
