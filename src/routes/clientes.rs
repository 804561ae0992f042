//! Cliente route handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::db::clientes::{self, CamposCliente};
use crate::error::Result;
use crate::models::{Cliente, StatusCliente};
use crate::AppState;

use super::exigir_campos;

/// Query parameters for the cliente listing
#[derive(Debug, Deserialize)]
pub struct ClientesQuery {
    pub nome: Option<String>,
    pub status: Option<StatusCliente>,
}

/// Create/update payload; `nome`, `email` and `telefone` are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientePayload {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub cpf_cnpj: Option<String>,
    pub status: Option<StatusCliente>,
    pub observacoes: Option<String>,
}

impl ClientePayload {
    fn validar(self) -> Result<CamposCliente> {
        let mut faltando = Vec::new();
        if self.nome.as_deref().map_or(true, str::is_empty) {
            faltando.push("nome");
        }
        if self.email.as_deref().map_or(true, str::is_empty) {
            faltando.push("email");
        }
        if self.telefone.as_deref().map_or(true, str::is_empty) {
            faltando.push("telefone");
        }
        exigir_campos(faltando)?;

        Ok(CamposCliente {
            nome: self.nome.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            telefone: self.telefone.unwrap_or_default(),
            cpf_cnpj: self.cpf_cnpj,
            status: self.status.unwrap_or(StatusCliente::Ativo),
            observacoes: self.observacoes,
        })
    }
}

pub async fn listar(
    State(state): State<AppState>,
    Query(query): Query<ClientesQuery>,
) -> Result<Json<Vec<Cliente>>> {
    let clientes = clientes::listar(&state.db, query.nome.as_deref(), query.status).await?;
    Ok(Json(clientes))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(payload): Json<ClientePayload>,
) -> Result<(StatusCode, Json<Cliente>)> {
    let cliente = clientes::criar(&state.db, payload.validar()?).await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ClientePayload>,
) -> Result<Json<Cliente>> {
    let cliente = clientes::atualizar(&state.db, id, payload.validar()?).await?;
    Ok(Json(cliente))
}

pub async fn remover(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    clientes::remover(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_completo() -> ClientePayload {
        ClientePayload {
            nome: Some("João Silva Santos".to_string()),
            email: Some("joao.silva@email.com".to_string()),
            telefone: Some("(11) 99999-9999".to_string()),
            cpf_cnpj: Some("123.456.789-00".to_string()),
            status: None,
            observacoes: None,
        }
    }

    #[test]
    fn valid_payload_defaults_status_to_ativo() {
        let campos = payload_completo().validar().unwrap();
        assert_eq!(campos.status, StatusCliente::Ativo);
        assert_eq!(campos.nome, "João Silva Santos");
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let payload = ClientePayload {
            nome: None,
            email: Some(String::new()),
            telefone: None,
            cpf_cnpj: None,
            status: None,
            observacoes: None,
        };
        let err = payload.validar().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("nome"));
        assert!(msg.contains("email"));
        assert!(msg.contains("telefone"));
    }

    #[test]
    fn camel_case_payload_deserializes() {
        let payload: ClientePayload = serde_json::from_str(
            r#"{"nome":"Maria","email":"m@x.com","telefone":"1","cpfCnpj":"12.345.678/0001-90","status":"Inativo"}"#,
        )
        .unwrap();
        let campos = payload.validar().unwrap();
        assert_eq!(campos.cpf_cnpj.as_deref(), Some("12.345.678/0001-90"));
        assert_eq!(campos.status, StatusCliente::Inativo);
    }
}
