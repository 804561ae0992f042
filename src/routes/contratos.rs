//! Contrato route handlers
//!
//! Create and update never accept `dataTermino` or `valorTotal`; both are
//! derived server-side from the referenced servico.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::billing::services::{self, NovoContrato};
use crate::db::contratos;
use crate::error::Result;
use crate::models::{Contrato, ContratoDetalhe, StatusContrato};
use crate::AppState;

use super::exigir_campos;

/// Query parameters for the contrato listing
#[derive(Debug, Deserialize)]
pub struct ContratosQuery {
    pub search: Option<String>,
}

/// Create/update payload; `clienteId`, `servicoId` and `dataInicio` are
/// required, status defaults to Ativo.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContratoPayload {
    pub cliente_id: Option<i32>,
    pub servico_id: Option<i32>,
    pub data_inicio: Option<NaiveDate>,
    pub status: Option<StatusContrato>,
}

impl ContratoPayload {
    fn validar(self) -> Result<NovoContrato> {
        let mut faltando = Vec::new();
        if self.cliente_id.is_none() {
            faltando.push("clienteId");
        }
        if self.servico_id.is_none() {
            faltando.push("servicoId");
        }
        if self.data_inicio.is_none() {
            faltando.push("dataInicio");
        }
        exigir_campos(faltando)?;

        Ok(NovoContrato {
            cliente_id: self.cliente_id.unwrap_or_default(),
            servico_id: self.servico_id.unwrap_or_default(),
            data_inicio: self.data_inicio.unwrap_or_default(),
            status: self.status.unwrap_or(StatusContrato::Ativo),
        })
    }
}

pub async fn listar(
    State(state): State<AppState>,
    Query(query): Query<ContratosQuery>,
) -> Result<Json<Vec<ContratoDetalhe>>> {
    let contratos = contratos::listar(&state.db, query.search.as_deref()).await?;
    Ok(Json(contratos))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(payload): Json<ContratoPayload>,
) -> Result<(StatusCode, Json<Contrato>)> {
    let contrato = services::criar_contrato(&state.db, payload.validar()?).await?;
    Ok((StatusCode::CREATED, Json(contrato)))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ContratoPayload>,
) -> Result<Json<Contrato>> {
    let contrato = services::atualizar_contrato(&state.db, id, payload.validar()?).await?;
    Ok(Json(contrato))
}

pub async fn remover(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    contratos::remover(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_fields_are_not_accepted_from_the_caller() {
        // Unknown fields are ignored by serde; the validated output carries
        // only the caller-settable fields.
        let payload: ContratoPayload = serde_json::from_str(
            r#"{"clienteId":1,"servicoId":2,"dataInicio":"2024-01-15","valorTotal":"1.00","dataTermino":"2030-01-01"}"#,
        )
        .unwrap();
        let novo = payload.validar().unwrap();
        assert_eq!(novo.cliente_id, 1);
        assert_eq!(novo.servico_id, 2);
        assert_eq!(novo.status, StatusContrato::Ativo);
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let payload: ContratoPayload = serde_json::from_str("{}").unwrap();
        let msg = payload.validar().unwrap_err().to_string();
        assert!(msg.contains("clienteId"));
        assert!(msg.contains("servicoId"));
        assert!(msg.contains("dataInicio"));
    }
}
