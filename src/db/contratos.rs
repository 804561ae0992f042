//! Queries for the `contratos` table.
//!
//! Create and update live in `billing::services`, since they derive fields
//! from the servico inside a transaction.

use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::ContratoDetalhe;

/// List contratos joined with cliente and servico names, newest first.
/// `search` is a case-insensitive substring match on either name.
pub async fn listar(pool: &PgPool, search: Option<&str>) -> Result<Vec<ContratoDetalhe>> {
    let contratos = sqlx::query_as::<_, ContratoDetalhe>(
        r#"
        SELECT
            c.id,
            c.cliente_id,
            c.servico_id,
            cli.nome AS cliente_nome,
            s.nome AS servico_nome,
            c.data_inicio,
            c.data_termino,
            c.status,
            c.valor_total
        FROM contratos c
        JOIN clientes cli ON c.cliente_id = cli.id
        JOIN servicos s ON c.servico_id = s.id
        WHERE ($1::text IS NULL
               OR cli.nome ILIKE '%' || $1 || '%'
               OR s.nome ILIKE '%' || $1 || '%')
        ORDER BY c.data_inicio DESC, c.id DESC
        "#,
    )
    .bind(search)
    .fetch_all(pool)
    .await?;

    Ok(contratos)
}

/// Delete a contrato. Mensalidades still referencing it make the delete
/// fail with a foreign-key violation, surfaced as a 400.
pub async fn remover(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query_scalar::<_, i32>("DELETE FROM contratos WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Contrato não encontrado".to_string()))?;

    Ok(())
}
