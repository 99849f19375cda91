use thiserror::Error;

use super::cart::{ProductId, UserId};

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User {0} not found")]
    UserNotFound(UserId),
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),
    #[error("No hay suficiente stock. Stock disponible: {available}")]
    InsufficientStock { available: i32 },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
