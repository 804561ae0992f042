//! Backend service for the mensalidades management system.
//!
//! Manages clientes, servicos, contratos and mensalidades over a JSON REST
//! API. Contract end dates and totals are derived server-side in the
//! [`billing`] module; everything else is conventional CRUD over Postgres.

pub mod billing;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use axum::Router;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use error::{AppError, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
}

/// Build the application with its middleware stack.
pub fn app(state: AppState) -> Router {
    routes::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}
