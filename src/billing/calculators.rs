//! Core billing calculation functions.
//!
//! Pure functions for contract derivation and billing status - no database
//! access. Everything here is total and deterministic given its inputs.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::StatusPagamento;

/// Advance a contract start date by its duration in months.
///
/// Calendar month arithmetic: year boundaries roll over and the day of
/// month clamps to the last day of the target month, so
/// 2024-01-31 + 1 month = 2024-02-29.
///
/// Returns `None` only on date overflow (durations far beyond any real
/// contract term).
pub fn data_termino_contrato(data_inicio: NaiveDate, duracao_meses: u32) -> Option<NaiveDate> {
    data_inicio.checked_add_months(Months::new(duracao_meses))
}

/// Total contract value: monthly rate times duration, in exact decimal
/// arithmetic. 2500.00 x 12 = 30000.00, no floating-point drift.
pub fn valor_total_contrato(valor_mensal: Decimal, duracao_meses: u32) -> Decimal {
    valor_mensal * Decimal::from(duracao_meses)
}

/// Derive the billing status of a mensalidade from its dates.
///
/// `Pago` if a payment date is set, else `Vencido` once `hoje` is past the
/// due date, else `EmAberto`.
pub fn derive_status(
    data_vencimento: NaiveDate,
    data_pagamento: Option<NaiveDate>,
    hoje: NaiveDate,
) -> StatusPagamento {
    if data_pagamento.is_some() {
        StatusPagamento::Pago
    } else if hoje > data_vencimento {
        StatusPagamento::Vencido
    } else {
        StatusPagamento::EmAberto
    }
}

/// Validate a reference-month label in `YYYY-MM` form with month 01-12.
pub fn mes_referencia_valido(mes: &str) -> bool {
    let bytes = mes.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return false;
    }
    if !mes[..4].bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match mes[5..].parse::<u32>() {
        Ok(m) if mes[5..].bytes().all(|b| b.is_ascii_digit()) => (1..=12).contains(&m),
        _ => false,
    }
}

/// Reference-month label (`YYYY-MM`) for a date.
pub fn mes_referencia_de(data: NaiveDate) -> String {
    data.format("%Y-%m").to_string()
}

/// The `n` reference-month labels ending at the month of `hoje`, oldest
/// first. Used by the dashboard revenue series.
pub fn ultimos_meses(hoje: NaiveDate, n: u32) -> Vec<String> {
    let inicio = hoje.with_day(1).unwrap_or(hoje);
    (0..n)
        .rev()
        .filter_map(|i| inicio.checked_sub_months(Months::new(i)))
        .map(mes_referencia_de)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ==================== data_termino_contrato tests ====================

    #[test]
    fn test_end_date_plain_month_add() {
        assert_eq!(
            data_termino_contrato(date(2024, 1, 15), 12),
            Some(date(2025, 1, 15))
        );
        assert_eq!(
            data_termino_contrato(date(2024, 2, 10), 6),
            Some(date(2024, 8, 10))
        );
    }

    #[test]
    fn test_end_date_clamps_to_short_month() {
        // February has no 31st; the day clamps to the last day of the month
        assert_eq!(
            data_termino_contrato(date(2024, 1, 31), 1),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            data_termino_contrato(date(2023, 1, 31), 1),
            Some(date(2023, 2, 28))
        );
        assert_eq!(
            data_termino_contrato(date(2024, 8, 31), 1),
            Some(date(2024, 9, 30))
        );
    }

    #[test]
    fn test_end_date_clamped_day_does_not_stick() {
        // A full year from Jan 31 lands back on Jan 31, not on a clamped day
        assert_eq!(
            data_termino_contrato(date(2024, 1, 31), 12),
            Some(date(2025, 1, 31))
        );
    }

    #[test]
    fn test_end_date_rolls_over_year_boundary() {
        assert_eq!(
            data_termino_contrato(date(2024, 11, 20), 3),
            Some(date(2025, 2, 20))
        );
        assert_eq!(
            data_termino_contrato(date(2024, 6, 1), 24),
            Some(date(2026, 6, 1))
        );
    }

    #[test]
    fn test_end_date_zero_months_is_identity() {
        assert_eq!(
            data_termino_contrato(date(2024, 5, 5), 0),
            Some(date(2024, 5, 5))
        );
    }

    // ==================== valor_total_contrato tests ====================

    #[test]
    fn test_total_value_exact_multiplication() {
        assert_eq!(valor_total_contrato(dec!(2500.00), 12), dec!(30000.00));
        assert_eq!(valor_total_contrato(dec!(800.00), 6), dec!(4800.00));
        assert_eq!(valor_total_contrato(dec!(1200.00), 12), dec!(14400.00));
    }

    #[test]
    fn test_total_value_no_floating_point_drift() {
        // 0.10 * 3 must be exactly 0.30
        assert_eq!(valor_total_contrato(dec!(0.10), 3), dec!(0.30));
        assert_eq!(valor_total_contrato(dec!(33.33), 3), dec!(99.99));
    }

    #[test]
    fn test_total_value_zero_rate() {
        assert_eq!(valor_total_contrato(dec!(0), 12), dec!(0));
    }

    // ==================== derive_status tests ====================

    #[test]
    fn test_derive_status_paid_wins_over_everything() {
        let paid = Some(date(2024, 6, 5));
        assert_eq!(
            derive_status(date(2024, 6, 15), paid, date(2024, 6, 20)),
            StatusPagamento::Pago
        );
        // Paid even after the due date passed
        assert_eq!(
            derive_status(date(2024, 6, 15), Some(date(2024, 7, 1)), date(2024, 8, 1)),
            StatusPagamento::Pago
        );
    }

    #[test]
    fn test_derive_status_overdue() {
        assert_eq!(
            derive_status(date(2024, 7, 15), None, date(2024, 7, 20)),
            StatusPagamento::Vencido
        );
    }

    #[test]
    fn test_derive_status_open_before_due() {
        assert_eq!(
            derive_status(date(2024, 7, 15), None, date(2024, 7, 10)),
            StatusPagamento::EmAberto
        );
    }

    #[test]
    fn test_derive_status_due_today_still_open() {
        // Overdue only strictly after the due date
        assert_eq!(
            derive_status(date(2024, 7, 15), None, date(2024, 7, 15)),
            StatusPagamento::EmAberto
        );
    }

    // ==================== mes_referencia tests ====================

    #[test]
    fn test_mes_referencia_accepts_valid_labels() {
        assert!(mes_referencia_valido("2024-06"));
        assert!(mes_referencia_valido("1999-01"));
        assert!(mes_referencia_valido("2030-12"));
    }

    #[test]
    fn test_mes_referencia_rejects_bad_labels() {
        assert!(!mes_referencia_valido("2024-13"));
        assert!(!mes_referencia_valido("2024-00"));
        assert!(!mes_referencia_valido("2024-6"));
        assert!(!mes_referencia_valido("24-06"));
        assert!(!mes_referencia_valido("2024/06"));
        assert!(!mes_referencia_valido("junho"));
        assert!(!mes_referencia_valido(""));
    }

    #[test]
    fn test_mes_referencia_de() {
        assert_eq!(mes_referencia_de(date(2024, 6, 15)), "2024-06");
        assert_eq!(mes_referencia_de(date(2024, 12, 1)), "2024-12");
    }

    #[test]
    fn test_ultimos_meses_spans_year_boundary() {
        let meses = ultimos_meses(date(2024, 2, 10), 6);
        assert_eq!(
            meses,
            vec!["2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02"]
        );
    }

    #[test]
    fn test_ultimos_meses_single() {
        assert_eq!(ultimos_meses(date(2024, 6, 30), 1), vec!["2024-06"]);
    }
}
