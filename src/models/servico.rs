//! Servico (service offering) model

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Servico row from the `servicos` table.
///
/// `valor_mensal` is the monthly rate and `duracao_contrato` the contract
/// term in months; together they drive the contract derivation.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Servico {
    pub id: i32,
    pub nome: String,
    pub descricao: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub valor_mensal: Decimal,
    pub duracao_contrato: i32,
}
