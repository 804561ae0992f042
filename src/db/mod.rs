//! Database access layer: pool setup and per-entity queries

pub mod clientes;
pub mod contratos;
pub mod dashboard;
pub mod mensalidades;
pub mod servicos;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create the application connection pool.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}
