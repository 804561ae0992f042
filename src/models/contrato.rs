//! Contrato (contract) models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle status of a contrato
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "status_contrato")]
pub enum StatusContrato {
    Ativo,
    Finalizado,
}

/// Contrato row from the `contratos` table.
///
/// `data_termino` and `valor_total` are always server-derived from the
/// referenced servico; they are never accepted from the caller.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contrato {
    pub id: i32,
    pub cliente_id: i32,
    pub servico_id: i32,
    pub data_inicio: NaiveDate,
    pub data_termino: NaiveDate,
    pub status: StatusContrato,
    #[serde(with = "rust_decimal::serde::str")]
    pub valor_total: Decimal,
}

/// Contrato joined with cliente and servico names, for listings
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContratoDetalhe {
    pub id: i32,
    pub cliente_id: i32,
    pub servico_id: i32,
    pub cliente_nome: String,
    pub servico_nome: String,
    pub data_inicio: NaiveDate,
    pub data_termino: NaiveDate,
    pub status: StatusContrato,
    #[serde(with = "rust_decimal::serde::str")]
    pub valor_total: Decimal,
}
