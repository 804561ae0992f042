//! Queries for the `mensalidades` table

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::{FormaPagamento, Mensalidade, MensalidadeDetalhe, StatusPagamento};

const COLUNAS: &str = "id, contrato_id, mes_referencia, valor, data_vencimento, \
                       data_pagamento, forma_pagamento, status_pagamento";

/// Fields accepted when creating a mensalidade. Payment-field pairing is
/// validated at the route boundary before this is built.
#[derive(Debug, Clone)]
pub struct CamposMensalidade {
    pub contrato_id: i32,
    pub mes_referencia: String,
    pub valor: Decimal,
    pub data_vencimento: NaiveDate,
    pub data_pagamento: Option<NaiveDate>,
    pub forma_pagamento: Option<FormaPagamento>,
    pub status_pagamento: StatusPagamento,
}

/// List mensalidades joined with cliente and servico names, latest due
/// date first.
pub async fn listar(pool: &PgPool) -> Result<Vec<MensalidadeDetalhe>> {
    let mensalidades = sqlx::query_as::<_, MensalidadeDetalhe>(
        r#"
        SELECT
            m.id,
            m.contrato_id,
            cli.nome AS cliente_nome,
            s.nome AS servico_nome,
            m.mes_referencia,
            m.valor,
            m.data_vencimento,
            m.data_pagamento,
            m.forma_pagamento,
            m.status_pagamento
        FROM mensalidades m
        JOIN contratos c ON m.contrato_id = c.id
        JOIN clientes cli ON c.cliente_id = cli.id
        JOIN servicos s ON c.servico_id = s.id
        ORDER BY m.data_vencimento DESC, m.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(mensalidades)
}

/// Create a mensalidade, checking the contrato FK under the same
/// transaction as the insert.
pub async fn criar(pool: &PgPool, campos: CamposMensalidade) -> Result<Mensalidade> {
    let mut tx = pool.begin().await?;

    let contrato = sqlx::query_scalar::<_, i32>("SELECT id FROM contratos WHERE id = $1")
        .bind(campos.contrato_id)
        .fetch_optional(&mut *tx)
        .await?;
    if contrato.is_none() {
        return Err(AppError::Validation("Contrato não encontrado".to_string()));
    }

    let mensalidade = sqlx::query_as::<_, Mensalidade>(&format!(
        r#"
        INSERT INTO mensalidades
            (contrato_id, mes_referencia, valor, data_vencimento,
             data_pagamento, forma_pagamento, status_pagamento)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {COLUNAS}
        "#,
    ))
    .bind(campos.contrato_id)
    .bind(campos.mes_referencia)
    .bind(campos.valor)
    .bind(campos.data_vencimento)
    .bind(campos.data_pagamento)
    .bind(campos.forma_pagamento)
    .bind(campos.status_pagamento)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(mensalidade)
}

/// Update the amount and due date of a mensalidade. Payment fields only
/// change through the pagar flow.
pub async fn atualizar(
    pool: &PgPool,
    id: i32,
    valor: Decimal,
    data_vencimento: NaiveDate,
) -> Result<Mensalidade> {
    sqlx::query_as::<_, Mensalidade>(&format!(
        r#"
        UPDATE mensalidades
        SET valor = $1, data_vencimento = $2
        WHERE id = $3
        RETURNING {COLUNAS}
        "#,
    ))
    .bind(valor)
    .bind(data_vencimento)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Mensalidade não encontrada".to_string()))
}

pub async fn remover(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query_scalar::<_, i32>("DELETE FROM mensalidades WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Mensalidade não encontrada".to_string()))?;

    Ok(())
}
