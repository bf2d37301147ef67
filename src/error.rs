use thiserror::Error;

use crate::domain::{Amount, OrderId, OrderStatus, PaymentId};

/// Every failure the shop can surface to a caller.
///
/// Workflow failures are raised where the violated rule lives and reach the
/// caller unmodified; the enclosing transaction is rolled back.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Invalid points: {0}")]
    InvalidPoints(Amount),
    #[error("Insufficient points: requested {requested}, balance {balance}")]
    InsufficientPoints { requested: Amount, balance: Amount },
    #[error("Order {order} is not payable in status {status}")]
    NotPending { order: OrderId, status: OrderStatus },
    #[error("Payment {0} is cancelled")]
    PaymentCancelled(PaymentId),
    #[error("Amount mismatch: expected {expected}, order total {actual}")]
    AmountMismatch { expected: Amount, actual: Amount },
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Email already registered: {0}")]
    AlreadyRegistered(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Credential error: {0}")]
    Credential(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type ShopResult<T> = Result<T, ShopError>;

/// Response class a boundary layer should map an error to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    BadRequest,
    Unauthorized,
    Conflict,
    Internal,
}

impl ShopError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ShopError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn status(&self) -> ResponseStatus {
        match self {
            ShopError::AlreadyRegistered(_) => ResponseStatus::Conflict,
            ShopError::InvalidCredentials => ResponseStatus::Unauthorized,
            ShopError::Credential(_) | ShopError::Unavailable(_) => ResponseStatus::Internal,
            _ => ResponseStatus::BadRequest,
        }
    }
}
