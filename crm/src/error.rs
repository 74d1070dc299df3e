use thiserror::Error;

/// Domain errors surfaced by the storage layer.
///
/// Display strings for the validation variants are the exact messages the
/// mutation payloads carry in their `errors` lists; anything else propagates
/// to the caller as an internal error.
#[derive(Debug, Error)]
pub enum CrmError {
    #[error("Email already exists")]
    EmailExists,
    #[error("Invalid phone format")]
    InvalidPhone,
    #[error("Invalid customer ID")]
    CustomerNotFound(i64),
    #[error("At least one product must be provided")]
    NoProducts,
    #[error("Invalid product ID(s): {}", .0.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", "))]
    ProductsNotFound(Vec<i64>),
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl CrmError {
    /// Validation failures belong in the mutation payload `errors` list;
    /// everything else is an infrastructure failure.
    pub fn is_validation(&self) -> bool {
        !matches!(self, CrmError::Database(_))
    }
}
