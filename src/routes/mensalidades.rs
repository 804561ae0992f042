//! Mensalidade route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::billing::calculators::mes_referencia_valido;
use crate::billing::services::{self, Pagamento};
use crate::db::mensalidades::{self, CamposMensalidade};
use crate::error::{AppError, Result};
use crate::models::{FormaPagamento, Mensalidade, MensalidadeDetalhe, StatusPagamento};
use crate::AppState;

use super::exigir_campos;

/// Creation payload. Payment fields are optional but must pair with a
/// 'Pago' status; status defaults to 'Em aberto'.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MensalidadePayload {
    pub contrato_id: Option<i32>,
    pub mes_referencia: Option<String>,
    pub valor: Option<Decimal>,
    pub data_vencimento: Option<NaiveDate>,
    pub data_pagamento: Option<NaiveDate>,
    pub forma_pagamento: Option<FormaPagamento>,
    pub status_pagamento: Option<StatusPagamento>,
}

impl MensalidadePayload {
    fn validar(self) -> Result<CamposMensalidade> {
        let mut faltando = Vec::new();
        if self.contrato_id.is_none() {
            faltando.push("contratoId");
        }
        if self.mes_referencia.as_deref().map_or(true, str::is_empty) {
            faltando.push("mesReferencia");
        }
        if self.valor.is_none() {
            faltando.push("valor");
        }
        if self.data_vencimento.is_none() {
            faltando.push("dataVencimento");
        }
        exigir_campos(faltando)?;

        let mes_referencia = self.mes_referencia.unwrap_or_default();
        if !mes_referencia_valido(&mes_referencia) {
            return Err(AppError::Validation(
                "mesReferencia deve estar no formato YYYY-MM".to_string(),
            ));
        }
        let valor = self.valor.unwrap_or_default();
        if valor < Decimal::ZERO {
            return Err(AppError::Validation(
                "valor não pode ser negativo".to_string(),
            ));
        }

        let status_pagamento = self.status_pagamento.unwrap_or(StatusPagamento::EmAberto);
        services::validar_campos_pagamento(
            status_pagamento,
            self.data_pagamento,
            self.forma_pagamento,
        )?;

        Ok(CamposMensalidade {
            contrato_id: self.contrato_id.unwrap_or_default(),
            mes_referencia,
            valor,
            data_vencimento: self.data_vencimento.unwrap_or_default(),
            data_pagamento: self.data_pagamento,
            forma_pagamento: self.forma_pagamento,
            status_pagamento,
        })
    }
}

/// Update payload: only amount and due date change here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MensalidadeUpdatePayload {
    pub valor: Option<Decimal>,
    pub data_vencimento: Option<NaiveDate>,
}

/// Payment payload for the pagar endpoint; both fields required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagamentoPayload {
    pub data_pagamento: Option<NaiveDate>,
    pub forma_pagamento: Option<FormaPagamento>,
}

impl PagamentoPayload {
    fn validar(self) -> Result<Pagamento> {
        match (self.data_pagamento, self.forma_pagamento) {
            (Some(data_pagamento), Some(forma_pagamento)) => Ok(Pagamento {
                data_pagamento,
                forma_pagamento,
            }),
            (data, forma) => {
                let mut faltando = Vec::new();
                if data.is_none() {
                    faltando.push("dataPagamento");
                }
                if forma.is_none() {
                    faltando.push("formaPagamento");
                }
                Err(AppError::Validation(format!(
                    "Campos obrigatórios: {}",
                    faltando.join(", ")
                )))
            }
        }
    }
}

/// List mensalidades with joined names; unpaid rows past due read as
/// 'Vencido' without being rewritten.
pub async fn listar(State(state): State<AppState>) -> Result<Json<Vec<MensalidadeDetalhe>>> {
    let hoje = Utc::now().date_naive();
    let mensalidades = mensalidades::listar(&state.db)
        .await?
        .into_iter()
        .map(|m| m.com_status_efetivo(hoje))
        .collect();
    Ok(Json(mensalidades))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(payload): Json<MensalidadePayload>,
) -> Result<(StatusCode, Json<Mensalidade>)> {
    let mensalidade = mensalidades::criar(&state.db, payload.validar()?).await?;
    Ok((StatusCode::CREATED, Json(mensalidade)))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<MensalidadeUpdatePayload>,
) -> Result<Json<Mensalidade>> {
    let mut faltando = Vec::new();
    if payload.valor.is_none() {
        faltando.push("valor");
    }
    if payload.data_vencimento.is_none() {
        faltando.push("dataVencimento");
    }
    exigir_campos(faltando)?;
    let valor = payload.valor.unwrap_or_default();
    if valor < Decimal::ZERO {
        return Err(AppError::Validation(
            "valor não pode ser negativo".to_string(),
        ));
    }

    let mensalidade = mensalidades::atualizar(
        &state.db,
        id,
        valor,
        payload.data_vencimento.unwrap_or_default(),
    )
    .await?;
    Ok(Json(mensalidade))
}

pub async fn pagar(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PagamentoPayload>,
) -> Result<Json<Mensalidade>> {
    let mensalidade = services::pagar_mensalidade(&state.db, id, payload.validar()?).await?;
    Ok(Json(mensalidade))
}

pub async fn remover(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    mensalidades::remover(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
