//! Aggregate queries backing the dashboard endpoint

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::error::Result;

/// Active-contract count per servico
#[derive(Debug, Clone, FromRow, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicoContratado {
    pub nome: String,
    pub quantidade: i64,
}

/// Paid revenue for one reference month
#[derive(Debug, Clone, FromRow)]
pub struct ReceitaMensal {
    pub mes: String,
    pub valor: Decimal,
}

pub async fn clientes_ativos(pool: &PgPool) -> Result<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clientes WHERE status = 'Ativo'")
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn contratos_ativos(pool: &PgPool) -> Result<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contratos WHERE status = 'Ativo'")
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Sum of paid mensalidades for one reference month.
pub async fn receita_do_mes(pool: &PgPool, mes_referencia: &str) -> Result<Decimal> {
    let total = sqlx::query_scalar::<_, Decimal>(
        r#"
        SELECT COALESCE(SUM(valor), 0)
        FROM mensalidades
        WHERE status_pagamento = 'Pago' AND mes_referencia = $1
        "#,
    )
    .bind(mes_referencia)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

/// Count of effectively overdue mensalidades: rows already marked Vencido
/// plus open rows past due, matching the lazy status reads elsewhere.
pub async fn mensalidades_em_atraso(pool: &PgPool, hoje: NaiveDate) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM mensalidades
        WHERE status_pagamento = 'Vencido'
           OR (status_pagamento = 'Em aberto' AND data_vencimento < $1)
        "#,
    )
    .bind(hoje)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Servicos ranked by active-contract count, descending.
pub async fn servicos_mais_contratados(pool: &PgPool) -> Result<Vec<ServicoContratado>> {
    let ranking = sqlx::query_as::<_, ServicoContratado>(
        r#"
        SELECT s.nome, COUNT(c.id) AS quantidade
        FROM servicos s
        LEFT JOIN contratos c ON c.servico_id = s.id AND c.status = 'Ativo'
        GROUP BY s.id, s.nome
        ORDER BY quantidade DESC, s.nome
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(ranking)
}

/// Paid revenue grouped by reference month, restricted to the given labels.
/// Months with no paid rows are absent; the caller fills zeros.
pub async fn receita_por_mes(pool: &PgPool, meses: &[String]) -> Result<Vec<ReceitaMensal>> {
    let receitas = sqlx::query_as::<_, ReceitaMensal>(
        r#"
        SELECT mes_referencia AS mes, SUM(valor) AS valor
        FROM mensalidades
        WHERE status_pagamento = 'Pago' AND mes_referencia = ANY($1)
        GROUP BY mes_referencia
        ORDER BY mes_referencia
        "#,
    )
    .bind(meses)
    .fetch_all(pool)
    .await?;
    Ok(receitas)
}
