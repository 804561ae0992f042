//! Database models and API entities

pub mod cliente;
pub mod contrato;
pub mod mensalidade;
pub mod servico;

pub use cliente::{Cliente, StatusCliente};
pub use contrato::{Contrato, ContratoDetalhe, StatusContrato};
pub use mensalidade::{FormaPagamento, Mensalidade, MensalidadeDetalhe, StatusPagamento};
pub use servico::Servico;
