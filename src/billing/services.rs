//! Billing service functions with database access.
//!
//! Contract creation and update read the referenced servico, derive
//! `data_termino` and `valor_total` and persist the row inside a single
//! transaction, so the derived values can never disagree with the servico
//! row they were computed from. Payment marking follows the same pattern.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{AppError, Result};
use crate::models::{Contrato, FormaPagamento, Mensalidade, StatusContrato, StatusPagamento};

use super::calculators::{data_termino_contrato, valor_total_contrato};

/// Caller-supplied fields of a contrato; everything else is derived.
#[derive(Debug, Clone)]
pub struct NovoContrato {
    pub cliente_id: i32,
    pub servico_id: i32,
    pub data_inicio: NaiveDate,
    pub status: StatusContrato,
}

/// Caller-supplied payment data for the pagar operation.
#[derive(Debug, Clone, Copy)]
pub struct Pagamento {
    pub data_pagamento: NaiveDate,
    pub forma_pagamento: FormaPagamento,
}

/// Derived values for a contrato, computed from its servico.
#[derive(Debug, Clone, Copy)]
struct Derivacao {
    data_termino: NaiveDate,
    valor_total: Decimal,
}

/// Rate and duration read from the servico row under the transaction.
#[derive(Debug, sqlx::FromRow)]
struct TermosServico {
    valor_mensal: Decimal,
    duracao_contrato: i32,
}

fn derivar(data_inicio: NaiveDate, termos: &TermosServico) -> Result<Derivacao> {
    let duracao = u32::try_from(termos.duracao_contrato).map_err(|_| {
        AppError::Validation("Duração do contrato deve ser um número positivo de meses".to_string())
    })?;
    if duracao == 0 {
        return Err(AppError::Validation(
            "Duração do contrato deve ser um número positivo de meses".to_string(),
        ));
    }
    let data_termino = data_termino_contrato(data_inicio, duracao).ok_or_else(|| {
        AppError::Validation("Data de término fora do intervalo suportado".to_string())
    })?;
    Ok(Derivacao {
        data_termino,
        valor_total: valor_total_contrato(termos.valor_mensal, duracao),
    })
}

/// Check the FKs and compute the derived fields, all under `tx`.
async fn preparar_contrato(
    tx: &mut Transaction<'_, Postgres>,
    novo: &NovoContrato,
) -> Result<Derivacao> {
    let cliente = sqlx::query_scalar::<_, i32>("SELECT id FROM clientes WHERE id = $1")
        .bind(novo.cliente_id)
        .fetch_optional(&mut **tx)
        .await?;
    if cliente.is_none() {
        return Err(AppError::Validation("Cliente não encontrado".to_string()));
    }

    let termos = sqlx::query_as::<_, TermosServico>(
        "SELECT valor_mensal, duracao_contrato FROM servicos WHERE id = $1",
    )
    .bind(novo.servico_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::Validation("Serviço não encontrado".to_string()))?;

    derivar(novo.data_inicio, &termos)
}

/// Create a contrato, deriving `data_termino` and `valor_total` server-side.
pub async fn criar_contrato(pool: &PgPool, novo: NovoContrato) -> Result<Contrato> {
    let mut tx = pool.begin().await?;
    let derivacao = preparar_contrato(&mut tx, &novo).await?;

    let contrato = sqlx::query_as::<_, Contrato>(
        r#"
        INSERT INTO contratos (cliente_id, servico_id, data_inicio, data_termino, status, valor_total)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, cliente_id, servico_id, data_inicio, data_termino, status, valor_total
        "#,
    )
    .bind(novo.cliente_id)
    .bind(novo.servico_id)
    .bind(novo.data_inicio)
    .bind(derivacao.data_termino)
    .bind(novo.status)
    .bind(derivacao.valor_total)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(contrato)
}

/// Update a contrato, re-deriving the computed fields from the (possibly
/// changed) servico.
pub async fn atualizar_contrato(pool: &PgPool, id: i32, novo: NovoContrato) -> Result<Contrato> {
    let mut tx = pool.begin().await?;
    let derivacao = preparar_contrato(&mut tx, &novo).await?;

    let contrato = sqlx::query_as::<_, Contrato>(
        r#"
        UPDATE contratos
        SET cliente_id = $1, servico_id = $2, data_inicio = $3,
            data_termino = $4, status = $5, valor_total = $6
        WHERE id = $7
        RETURNING id, cliente_id, servico_id, data_inicio, data_termino, status, valor_total
        "#,
    )
    .bind(novo.cliente_id)
    .bind(novo.servico_id)
    .bind(novo.data_inicio)
    .bind(derivacao.data_termino)
    .bind(novo.status)
    .bind(derivacao.valor_total)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Contrato não encontrado".to_string()))?;

    tx.commit().await?;
    Ok(contrato)
}

/// Payment date must not precede the contract start date.
pub fn validar_data_pagamento(data_pagamento: NaiveDate, data_inicio: NaiveDate) -> Result<()> {
    if data_pagamento < data_inicio {
        return Err(AppError::Validation(
            "Data de pagamento anterior ao início do contrato".to_string(),
        ));
    }
    Ok(())
}

/// Enforce that payment fields travel together with the 'Pago' status.
///
/// Used by mensalidade create and update, where the caller supplies the
/// status explicitly.
pub fn validar_campos_pagamento(
    status: StatusPagamento,
    data_pagamento: Option<NaiveDate>,
    forma_pagamento: Option<FormaPagamento>,
) -> Result<()> {
    let pago = status == StatusPagamento::Pago;
    let completos = data_pagamento.is_some() && forma_pagamento.is_some();
    let vazios = data_pagamento.is_none() && forma_pagamento.is_none();

    if pago && !completos {
        return Err(AppError::Validation(
            "Pagamento exige dataPagamento e formaPagamento".to_string(),
        ));
    }
    if !pago && !vazios {
        return Err(AppError::Validation(
            "dataPagamento e formaPagamento só são permitidos com status 'Pago'".to_string(),
        ));
    }
    Ok(())
}

/// Mark a mensalidade as paid.
///
/// Requires payment date and method together; rejects rows already paid and
/// payment dates before the contract start.
pub async fn pagar_mensalidade(pool: &PgPool, id: i32, pagamento: Pagamento) -> Result<Mensalidade> {
    let mut tx = pool.begin().await?;

    let atual = sqlx::query_as::<_, Mensalidade>(
        r#"
        SELECT id, contrato_id, mes_referencia, valor, data_vencimento,
               data_pagamento, forma_pagamento, status_pagamento
        FROM mensalidades
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Mensalidade não encontrada".to_string()))?;

    if atual.status_pagamento == StatusPagamento::Pago {
        return Err(AppError::Validation(
            "Mensalidade já está paga".to_string(),
        ));
    }

    let data_inicio =
        sqlx::query_scalar::<_, NaiveDate>("SELECT data_inicio FROM contratos WHERE id = $1")
            .bind(atual.contrato_id)
            .fetch_one(&mut *tx)
            .await?;
    validar_data_pagamento(pagamento.data_pagamento, data_inicio)?;

    let paga = sqlx::query_as::<_, Mensalidade>(
        r#"
        UPDATE mensalidades
        SET status_pagamento = 'Pago', data_pagamento = $1, forma_pagamento = $2
        WHERE id = $3
        RETURNING id, contrato_id, mes_referencia, valor, data_vencimento,
                  data_pagamento, forma_pagamento, status_pagamento
        "#,
    )
    .bind(pagamento.data_pagamento)
    .bind(pagamento.forma_pagamento)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(paga)
}
