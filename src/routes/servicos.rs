//! Servico route handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::servicos::{self, CamposServico};
use crate::error::{AppError, Result};
use crate::models::Servico;
use crate::AppState;

use super::exigir_campos;

/// Query parameters for the servico listing
#[derive(Debug, Deserialize)]
pub struct ServicosQuery {
    pub nome: Option<String>,
}

/// Create/update payload; `nome`, `valorMensal` and `duracaoContrato` are
/// required. `descricao` defaults to empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicoPayload {
    pub nome: Option<String>,
    pub descricao: Option<String>,
    pub valor_mensal: Option<Decimal>,
    pub duracao_contrato: Option<i32>,
}

impl ServicoPayload {
    fn validar(self) -> Result<CamposServico> {
        let mut faltando = Vec::new();
        if self.nome.as_deref().map_or(true, str::is_empty) {
            faltando.push("nome");
        }
        if self.valor_mensal.is_none() {
            faltando.push("valorMensal");
        }
        if self.duracao_contrato.is_none() {
            faltando.push("duracaoContrato");
        }
        exigir_campos(faltando)?;

        let valor_mensal = self.valor_mensal.unwrap_or_default();
        if valor_mensal < Decimal::ZERO {
            return Err(AppError::Validation(
                "valorMensal não pode ser negativo".to_string(),
            ));
        }
        let duracao_contrato = self.duracao_contrato.unwrap_or_default();
        if duracao_contrato <= 0 {
            return Err(AppError::Validation(
                "duracaoContrato deve ser um número positivo de meses".to_string(),
            ));
        }

        Ok(CamposServico {
            nome: self.nome.unwrap_or_default(),
            descricao: self.descricao.unwrap_or_default(),
            valor_mensal,
            duracao_contrato,
        })
    }
}

pub async fn listar(
    State(state): State<AppState>,
    Query(query): Query<ServicosQuery>,
) -> Result<Json<Vec<Servico>>> {
    let servicos = servicos::listar(&state.db, query.nome.as_deref()).await?;
    Ok(Json(servicos))
}

pub async fn criar(
    State(state): State<AppState>,
    Json(payload): Json<ServicoPayload>,
) -> Result<(StatusCode, Json<Servico>)> {
    let servico = servicos::criar(&state.db, payload.validar()?).await?;
    Ok((StatusCode::CREATED, Json(servico)))
}

pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ServicoPayload>,
) -> Result<Json<Servico>> {
    let servico = servicos::atualizar(&state.db, id, payload.validar()?).await?;
    Ok(Json(servico))
}

pub async fn remover(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode> {
    servicos::remover(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn payload(valor: Option<Decimal>, duracao: Option<i32>) -> ServicoPayload {
        ServicoPayload {
            nome: Some("Consultoria Empresarial".to_string()),
            descricao: None,
            valor_mensal: valor,
            duracao_contrato: duracao,
        }
    }

    #[test]
    fn valid_payload_passes_with_empty_descricao() {
        let campos = payload(Some(dec!(2500.00)), Some(12)).validar().unwrap();
        assert_eq!(campos.descricao, "");
        assert_eq!(campos.valor_mensal, dec!(2500.00));
    }

    #[test]
    fn missing_required_fields_fail() {
        let err = payload(None, None).validar().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("valorMensal"));
        assert!(msg.contains("duracaoContrato"));
    }

    #[test]
    fn negative_rate_and_non_positive_duration_fail() {
        assert!(payload(Some(dec!(-1.00)), Some(12)).validar().is_err());
        assert!(payload(Some(dec!(100.00)), Some(0)).validar().is_err());
        assert!(payload(Some(dec!(100.00)), Some(-6)).validar().is_err());
    }

    #[test]
    fn decimal_payload_accepts_json_numbers() {
        let payload: ServicoPayload =
            serde_json::from_str(r#"{"nome":"Suporte","valorMensal":800.00,"duracaoContrato":6}"#)
                .unwrap();
        assert_eq!(payload.validar().unwrap().valor_mensal, dec!(800.00));
    }
}
