//! Mensalidade (monthly billing record) models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::billing::calculators::derive_status;

/// Payment method accepted for a mensalidade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "forma_pagamento")]
pub enum FormaPagamento {
    Pix,
    Boleto,
    #[serde(rename = "Cartão")]
    #[sqlx(rename = "Cartão")]
    Cartao,
}

/// Billing state of a mensalidade.
///
/// Transitions only move forward: `EmAberto -> Pago` through an explicit
/// payment, or `EmAberto -> Vencido` once the due date passes unpaid.
/// `Pago` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "status_pagamento")]
pub enum StatusPagamento {
    #[serde(rename = "Em aberto")]
    #[sqlx(rename = "Em aberto")]
    EmAberto,
    Pago,
    Vencido,
}

/// Mensalidade row from the `mensalidades` table
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mensalidade {
    pub id: i32,
    pub contrato_id: i32,
    pub mes_referencia: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub valor: Decimal,
    pub data_vencimento: NaiveDate,
    pub data_pagamento: Option<NaiveDate>,
    pub forma_pagamento: Option<FormaPagamento>,
    pub status_pagamento: StatusPagamento,
}

impl Mensalidade {
    /// Reconcile the stored status with the calendar.
    ///
    /// No background job flips rows to `Vencido`; reads report the derived
    /// status instead, leaving the stored row untouched.
    pub fn com_status_efetivo(mut self, hoje: NaiveDate) -> Self {
        if self.status_pagamento != StatusPagamento::Pago {
            self.status_pagamento = derive_status(self.data_vencimento, self.data_pagamento, hoje);
        }
        self
    }
}

/// Mensalidade joined with cliente and servico names, for listings
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MensalidadeDetalhe {
    pub id: i32,
    pub contrato_id: i32,
    pub cliente_nome: String,
    pub servico_nome: String,
    pub mes_referencia: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub valor: Decimal,
    pub data_vencimento: NaiveDate,
    pub data_pagamento: Option<NaiveDate>,
    pub forma_pagamento: Option<FormaPagamento>,
    pub status_pagamento: StatusPagamento,
}

impl MensalidadeDetalhe {
    /// Same lazy reconciliation as [`Mensalidade::com_status_efetivo`].
    pub fn com_status_efetivo(mut self, hoje: NaiveDate) -> Self {
        if self.status_pagamento != StatusPagamento::Pago {
            self.status_pagamento = derive_status(self.data_vencimento, self.data_pagamento, hoje);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mensalidade(status: StatusPagamento, vencimento: NaiveDate) -> Mensalidade {
        Mensalidade {
            id: 1,
            contrato_id: 1,
            mes_referencia: "2024-07".to_string(),
            valor: dec!(2500.00),
            data_vencimento: vencimento,
            data_pagamento: None,
            forma_pagamento: None,
            status_pagamento: status,
        }
    }

    #[test]
    fn open_row_past_due_reads_as_vencido() {
        let due = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let hoje = NaiveDate::from_ymd_opt(2024, 7, 20).unwrap();
        let m = mensalidade(StatusPagamento::EmAberto, due).com_status_efetivo(hoje);
        assert_eq!(m.status_pagamento, StatusPagamento::Vencido);
    }

    #[test]
    fn open_row_before_due_stays_em_aberto() {
        let due = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let hoje = NaiveDate::from_ymd_opt(2024, 7, 10).unwrap();
        let m = mensalidade(StatusPagamento::EmAberto, due).com_status_efetivo(hoje);
        assert_eq!(m.status_pagamento, StatusPagamento::EmAberto);
    }

    #[test]
    fn paid_row_is_terminal() {
        let due = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let hoje = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let mut m = mensalidade(StatusPagamento::Pago, due);
        m.data_pagamento = Some(NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());
        m.forma_pagamento = Some(FormaPagamento::Pix);
        let m = m.com_status_efetivo(hoje);
        assert_eq!(m.status_pagamento, StatusPagamento::Pago);
    }

    #[test]
    fn status_serializes_with_display_labels() {
        assert_eq!(
            serde_json::to_string(&StatusPagamento::EmAberto).unwrap(),
            "\"Em aberto\""
        );
        assert_eq!(
            serde_json::to_string(&FormaPagamento::Cartao).unwrap(),
            "\"Cartão\""
        );
    }
}
