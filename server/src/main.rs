//! Contacts Server - list endpoints with sorting, field shaping and pagination.
//!
//! Serves the contacts resource over HTTP. Sorting, field selection and
//! paging are planned by shape-engine; rows live in PostgreSQL.

mod config;
mod db;
mod error;
mod handlers;
mod mapping;
mod models;
mod routes;

use crate::config::Config;
use crate::db::Pool;
use crate::models::{Contact, ContactDto};
use axum::Router;
use shape_engine::PropertyMappingRegistry;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: Pool,
    pub registry: Arc<PropertyMappingRegistry>,
}

/// Build the router with its middleware.
fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers([routes::PAGINATION_HEADER]),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contacts_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Contacts Server on {}:{}", config.host, config.port);

    // Mappings are checked once; a broken table stops startup
    let registry = mapping::build_registry()?;
    let contact_mappings = registry.mappings::<ContactDto, Contact>()?;
    tracing::debug!("Registered {} contact sort mappings", contact_mappings.len());

    // Create database pool
    let pool = db::create_pool(&config.database_url, config.max_connections).await?;

    // Run migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    let state = AppState {
        pool,
        registry: Arc::new(registry),
    };

    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
