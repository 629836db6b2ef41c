//! Cart-specific error types.

use crate::domain::foundation::{
    CartId, DomainError, ErrorCode, ProductId, UserId, ValidationError,
};

/// Cart-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Cart was not found.
    NotFound(CartId),
    /// The cart's owner does not exist.
    UserNotFound(UserId),
    /// A cart line references a missing product.
    ProductNotFound(ProductId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl CartError {
    pub fn not_found(id: CartId) -> Self {
        CartError::NotFound(id)
    }
    pub fn user_not_found(id: UserId) -> Self {
        CartError::UserNotFound(id)
    }
    pub fn product_not_found(id: ProductId) -> Self {
        CartError::ProductNotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CartError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        CartError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            CartError::NotFound(_) => ErrorCode::CartNotFound,
            CartError::UserNotFound(_) => ErrorCode::UserNotFound,
            CartError::ProductNotFound(_) => ErrorCode::ProductNotFound,
            CartError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CartError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            CartError::NotFound(id) => format!("Cart not found: {}", id),
            CartError::UserNotFound(id) => format!("User not found: {}", id),
            CartError::ProductNotFound(id) => format!("Product not found: {}", id),
            CartError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CartError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CartError {}

impl From<ValidationError> for CartError {
    fn from(err: ValidationError) -> Self {
        CartError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for CartError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => CartError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => CartError::Infrastructure(err.to_string()),
        }
    }
}
