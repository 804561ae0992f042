//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Foreign-key violation (Postgres SQLSTATE 23503).
    ///
    /// Deletes are RESTRICTed at the schema level; the violation surfaces
    /// here as a validation-style 400 instead of an opaque 500.
    fn is_fk_violation(&self) -> bool {
        match self {
            AppError::Database(sqlx::Error::Database(db)) => {
                db.code().as_deref() == Some("23503")
            }
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "erro": msg }))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "erro": msg })),
            AppError::Database(e) if self.is_fk_violation() => (
                StatusCode::BAD_REQUEST,
                json!({
                    "erro": "Registro possui vínculos e não pode ser removido",
                    "detalhes": e.to_string(),
                }),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "erro": "Erro interno no banco de dados", "detalhes": e.to_string() }),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "erro": "Erro interno", "detalhes": msg }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn validation_maps_to_400() {
        let resp = AppError::Validation("Campos obrigatórios: nome".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::NotFound("Cliente não encontrado".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unexpected_database_error_maps_to_500() {
        let resp = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
