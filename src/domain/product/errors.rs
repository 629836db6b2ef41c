//! Product-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ProductId, ValidationError};

/// Product-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// Product was not found.
    NotFound(ProductId),
    /// Actor may not change the catalog.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ProductError {
    pub fn not_found(id: ProductId) -> Self {
        ProductError::NotFound(id)
    }
    pub fn forbidden() -> Self {
        ProductError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProductError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProductError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ProductError::NotFound(_) => ErrorCode::ProductNotFound,
            ProductError::Forbidden => ErrorCode::Forbidden,
            ProductError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ProductError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ProductError::NotFound(id) => format!("Product not found: {}", id),
            ProductError::Forbidden => "Only managers can change the catalog".to_string(),
            ProductError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ProductError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ProductError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProductError {}

impl From<ValidationError> for ProductError {
    fn from(err: ValidationError) -> Self {
        ProductError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for ProductError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ProductError::Forbidden,
            ErrorCode::ValidationFailed => ProductError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => ProductError::Infrastructure(err.to_string()),
        }
    }
}
