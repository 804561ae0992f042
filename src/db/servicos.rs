//! Queries for the `servicos` table

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::Servico;

const COLUNAS: &str = "id, nome, descricao, valor_mensal, duracao_contrato";

/// Fields accepted when creating or updating a servico.
#[derive(Debug, Clone)]
pub struct CamposServico {
    pub nome: String,
    pub descricao: String,
    pub valor_mensal: Decimal,
    pub duracao_contrato: i32,
}

/// List servicos with an optional case-insensitive name substring filter.
pub async fn listar(pool: &PgPool, nome: Option<&str>) -> Result<Vec<Servico>> {
    let servicos = sqlx::query_as::<_, Servico>(&format!(
        r#"
        SELECT {COLUNAS}
        FROM servicos
        WHERE ($1::text IS NULL OR nome ILIKE '%' || $1 || '%')
        ORDER BY nome
        "#,
    ))
    .bind(nome)
    .fetch_all(pool)
    .await?;

    Ok(servicos)
}

pub async fn criar(pool: &PgPool, campos: CamposServico) -> Result<Servico> {
    let servico = sqlx::query_as::<_, Servico>(&format!(
        r#"
        INSERT INTO servicos (nome, descricao, valor_mensal, duracao_contrato)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUNAS}
        "#,
    ))
    .bind(campos.nome)
    .bind(campos.descricao)
    .bind(campos.valor_mensal)
    .bind(campos.duracao_contrato)
    .fetch_one(pool)
    .await?;

    Ok(servico)
}

pub async fn atualizar(pool: &PgPool, id: i32, campos: CamposServico) -> Result<Servico> {
    sqlx::query_as::<_, Servico>(&format!(
        r#"
        UPDATE servicos
        SET nome = $1, descricao = $2, valor_mensal = $3, duracao_contrato = $4
        WHERE id = $5
        RETURNING {COLUNAS}
        "#,
    ))
    .bind(campos.nome)
    .bind(campos.descricao)
    .bind(campos.valor_mensal)
    .bind(campos.duracao_contrato)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Serviço não encontrado".to_string()))
}

pub async fn remover(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query_scalar::<_, i32>("DELETE FROM servicos WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Serviço não encontrado".to_string()))?;

    Ok(())
}
