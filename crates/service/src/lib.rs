//! Service layer providing catalog CRUD and search on top of models.
//! - Repositories hide the store behind object-safe async traits.
//! - Services own the business rules: validation before any write,
//!   existence checks, and category reference checks.
//! - Every failure is a typed [`errors::ServiceError`] for the HTTP layer
//!   to map onto a status code.

pub mod errors;
pub mod repository;
pub mod repo;
pub mod categoria_service;
pub mod produto_service;
#[cfg(test)]
pub mod test_support;

pub use categoria_service::CategoriaService;
pub use produto_service::ProdutoService;

use models::errors::FieldViolation;

pub const MSG_ID_REQUIRED: &str = "Você deve informar o ID para atualizar o registro.";

/// Update needs both a valid record and an `id`; a missing `id` is reported
/// in the same batch as the field violations.
pub(crate) fn require_update_id(
    id: Option<i64>,
    mut violations: Vec<FieldViolation>,
) -> Result<i64, errors::ServiceError> {
    match id {
        Some(id) if violations.is_empty() => Ok(id),
        id => {
            if id.is_none() {
                violations.insert(0, FieldViolation::new("id", MSG_ID_REQUIRED));
            }
            Err(errors::ServiceError::Validation(violations))
        }
    }
}
