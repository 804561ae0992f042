//! Billing engine: contract derivation and the mensalidade payment lifecycle.
//!
//! Pure date/decimal arithmetic lives in [`calculators`]; the transactional
//! create/update/pagar flows live in [`services`].

pub mod calculators;
pub mod services;

// Re-export commonly used items
pub use calculators::{data_termino_contrato, derive_status, valor_total_contrato};
