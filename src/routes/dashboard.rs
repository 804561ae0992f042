//! Dashboard aggregation endpoint

use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::billing::calculators::{mes_referencia_de, ultimos_meses};
use crate::db::dashboard::{self, ReceitaMensal, ServicoContratado};
use crate::error::Result;
use crate::AppState;

const MESES_SERIE: u32 = 6;

/// One point in the monthly revenue series
#[derive(Debug, Clone, Serialize)]
pub struct PontoReceita {
    pub mes: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub valor: Decimal,
}

/// Aggregated dashboard numbers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub clientes_ativos: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub receita_mes: Decimal,
    pub mensalidades_atraso: i64,
    pub total_contratos: i64,
    pub servicos_mais_contratados: Vec<ServicoContratado>,
    pub receita_por_mes: Vec<PontoReceita>,
}

/// Fill the trailing-months series with zeros for months without paid rows.
fn preencher_serie(meses: Vec<String>, receitas: Vec<ReceitaMensal>) -> Vec<PontoReceita> {
    meses
        .into_iter()
        .map(|mes| {
            let valor = receitas
                .iter()
                .find(|r| r.mes == mes)
                .map(|r| r.valor)
                .unwrap_or(Decimal::ZERO);
            PontoReceita { mes, valor }
        })
        .collect()
}

async fn montar_stats(state: &AppState, hoje: NaiveDate) -> Result<DashboardStats> {
    let mes_atual = mes_referencia_de(hoje);
    let meses = ultimos_meses(hoje, MESES_SERIE);

    let clientes_ativos = dashboard::clientes_ativos(&state.db).await?;
    let total_contratos = dashboard::contratos_ativos(&state.db).await?;
    let receita_mes = dashboard::receita_do_mes(&state.db, &mes_atual).await?;
    let mensalidades_atraso = dashboard::mensalidades_em_atraso(&state.db, hoje).await?;
    let servicos_mais_contratados = dashboard::servicos_mais_contratados(&state.db).await?;
    let receitas = dashboard::receita_por_mes(&state.db, &meses).await?;

    Ok(DashboardStats {
        clientes_ativos,
        receita_mes,
        mensalidades_atraso,
        total_contratos,
        servicos_mais_contratados,
        receita_por_mes: preencher_serie(meses, receitas),
    })
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let hoje = Utc::now().date_naive();
    Ok(Json(montar_stats(&state, hoje).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn series_fills_missing_months_with_zero() {
        let meses = vec![
            "2024-04".to_string(),
            "2024-05".to_string(),
            "2024-06".to_string(),
        ];
        let receitas = vec![ReceitaMensal {
            mes: "2024-05".to_string(),
            valor: dec!(3300.00),
        }];

        let serie = preencher_serie(meses, receitas);
        assert_eq!(serie.len(), 3);
        assert_eq!(serie[0].valor, Decimal::ZERO);
        assert_eq!(serie[1].valor, dec!(3300.00));
        assert_eq!(serie[2].valor, Decimal::ZERO);
        assert_eq!(serie[1].mes, "2024-05");
    }

    #[test]
    fn series_preserves_month_order() {
        let meses = vec!["2023-12".to_string(), "2024-01".to_string()];
        let serie = preencher_serie(meses, Vec::new());
        assert_eq!(serie[0].mes, "2023-12");
        assert_eq!(serie[1].mes, "2024-01");
    }
}
