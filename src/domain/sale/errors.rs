//! Sale-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SaleId, SaleItemId, ValidationError};

/// Sale-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaleError {
    /// Sale was not found.
    NotFound(SaleId),
    /// The sale has no item with this ID.
    ItemNotFound(SaleItemId),
    /// Another sale already uses this number.
    DuplicateSaleNumber(String),
    /// Sale is cancelled and can no longer change.
    AlreadyCancelled,
    /// Invalid state for operation.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl SaleError {
    pub fn not_found(id: SaleId) -> Self {
        SaleError::NotFound(id)
    }
    pub fn duplicate_sale_number(number: impl Into<String>) -> Self {
        SaleError::DuplicateSaleNumber(number.into())
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SaleError::InvalidState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SaleError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SaleError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SaleError::NotFound(_) => ErrorCode::SaleNotFound,
            SaleError::ItemNotFound(_) => ErrorCode::SaleItemNotFound,
            SaleError::DuplicateSaleNumber(_) => ErrorCode::DuplicateSaleNumber,
            SaleError::AlreadyCancelled => ErrorCode::SaleCancelled,
            SaleError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SaleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SaleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SaleError::NotFound(id) => format!("Sale not found: {}", id),
            SaleError::ItemNotFound(id) => format!("Sale item not found: {}", id),
            SaleError::DuplicateSaleNumber(number) => {
                format!("Sale number already in use: {}", number)
            }
            SaleError::AlreadyCancelled => "Cannot modify a cancelled sale".to_string(),
            SaleError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SaleError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SaleError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SaleError {}

impl From<ValidationError> for SaleError {
    fn from(err: ValidationError) -> Self {
        SaleError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for SaleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SaleCancelled => SaleError::AlreadyCancelled,
            ErrorCode::InvalidStateTransition => SaleError::InvalidState(err.message),
            ErrorCode::SaleItemNotFound => match err.details.get("item_id").map(|s| s.parse()) {
                Some(Ok(item_id)) => SaleError::ItemNotFound(item_id),
                _ => SaleError::Infrastructure(err.to_string()),
            },
            ErrorCode::DuplicateSaleNumber => SaleError::DuplicateSaleNumber(
                err.details.get("sale_number").cloned().unwrap_or_default(),
            ),
            ErrorCode::ValidationFailed => SaleError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => SaleError::Infrastructure(err.to_string()),
        }
    }
}
