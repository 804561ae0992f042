//! Cliente (customer) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Registration status of a cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "status_cliente")]
pub enum StatusCliente {
    Ativo,
    Inativo,
}

/// Cliente row from the `clientes` table
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: i32,
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub cpf_cnpj: Option<String>,
    pub status: StatusCliente,
    pub observacoes: Option<String>,
    pub data_cadastro: DateTime<Utc>,
}
