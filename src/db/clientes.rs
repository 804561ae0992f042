//! Queries for the `clientes` table

use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::{Cliente, StatusCliente};

const COLUNAS: &str = "id, nome, email, telefone, cpf_cnpj, status, observacoes, data_cadastro";

/// Fields accepted when creating or updating a cliente.
#[derive(Debug, Clone)]
pub struct CamposCliente {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub cpf_cnpj: Option<String>,
    pub status: StatusCliente,
    pub observacoes: Option<String>,
}

/// List clientes with optional case-insensitive name substring and exact
/// status filters.
pub async fn listar(
    pool: &PgPool,
    nome: Option<&str>,
    status: Option<StatusCliente>,
) -> Result<Vec<Cliente>> {
    let clientes = sqlx::query_as::<_, Cliente>(&format!(
        r#"
        SELECT {COLUNAS}
        FROM clientes
        WHERE ($1::text IS NULL OR nome ILIKE '%' || $1 || '%')
          AND ($2::status_cliente IS NULL OR status = $2)
        ORDER BY id
        "#,
    ))
    .bind(nome)
    .bind(status)
    .fetch_all(pool)
    .await?;

    Ok(clientes)
}

pub async fn criar(pool: &PgPool, campos: CamposCliente) -> Result<Cliente> {
    let cliente = sqlx::query_as::<_, Cliente>(&format!(
        r#"
        INSERT INTO clientes (nome, email, telefone, cpf_cnpj, status, observacoes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {COLUNAS}
        "#,
    ))
    .bind(campos.nome)
    .bind(campos.email)
    .bind(campos.telefone)
    .bind(campos.cpf_cnpj)
    .bind(campos.status)
    .bind(campos.observacoes)
    .fetch_one(pool)
    .await?;

    Ok(cliente)
}

pub async fn atualizar(pool: &PgPool, id: i32, campos: CamposCliente) -> Result<Cliente> {
    sqlx::query_as::<_, Cliente>(&format!(
        r#"
        UPDATE clientes
        SET nome = $1, email = $2, telefone = $3, cpf_cnpj = $4, status = $5, observacoes = $6
        WHERE id = $7
        RETURNING {COLUNAS}
        "#,
    ))
    .bind(campos.nome)
    .bind(campos.email)
    .bind(campos.telefone)
    .bind(campos.cpf_cnpj)
    .bind(campos.status)
    .bind(campos.observacoes)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Cliente não encontrado".to_string()))
}

/// Delete a cliente. Contratos still referencing it make the delete fail
/// with a foreign-key violation, surfaced as a 400.
pub async fn remover(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query_scalar::<_, i32>("DELETE FROM clientes WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente não encontrado".to_string()))?;

    Ok(())
}
