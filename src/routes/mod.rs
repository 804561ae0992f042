//! HTTP route handlers

pub mod clientes;
pub mod contratos;
pub mod dashboard;
pub mod mensalidades;
pub mod servicos;

use axum::{
    routing::{get, put},
    Router,
};

use crate::error::Result;
use crate::AppState;

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/clientes", get(clientes::listar).post(clientes::criar))
        .route(
            "/clientes/:id",
            put(clientes::atualizar).delete(clientes::remover),
        )
        .route("/servicos", get(servicos::listar).post(servicos::criar))
        .route(
            "/servicos/:id",
            put(servicos::atualizar).delete(servicos::remover),
        )
        .route("/contratos", get(contratos::listar).post(contratos::criar))
        .route(
            "/contratos/:id",
            put(contratos::atualizar).delete(contratos::remover),
        )
        .route(
            "/mensalidades",
            get(mensalidades::listar).post(mensalidades::criar),
        )
        .route(
            "/mensalidades/:id",
            put(mensalidades::atualizar).delete(mensalidades::remover),
        )
        .route("/mensalidades/:id/pagar", put(mensalidades::pagar))
        .route("/dashboard", get(dashboard::stats))
        .with_state(state)
}

async fn health() -> Result<&'static str> {
    Ok("API do sistema de mensalidades funcionando corretamente")
}

/// Shared helper: fail with one message listing every missing required
/// field, mirroring the API's "Campos obrigatórios" contract.
pub(crate) fn exigir_campos(faltando: Vec<&str>) -> Result<()> {
    if faltando.is_empty() {
        Ok(())
    } else {
        Err(crate::error::AppError::Validation(format!(
            "Campos obrigatórios: {}",
            faltando.join(", ")
        )))
    }
}
