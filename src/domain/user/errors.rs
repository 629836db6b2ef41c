//! User-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// User-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// User was not found.
    NotFound(UserId),
    /// Another user already owns this email.
    DuplicateEmail(String),
    /// Actor may not act on this user.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl UserError {
    pub fn not_found(id: UserId) -> Self {
        UserError::NotFound(id)
    }
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        UserError::DuplicateEmail(email.into())
    }
    pub fn forbidden() -> Self {
        UserError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        UserError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::NotFound(_) => ErrorCode::UserNotFound,
            UserError::DuplicateEmail(_) => ErrorCode::DuplicateEmail,
            UserError::Forbidden => ErrorCode::Forbidden,
            UserError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            UserError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            UserError::NotFound(id) => format!("User not found: {}", id),
            UserError::DuplicateEmail(email) => format!("Email already registered: {}", email),
            UserError::Forbidden => "Permission denied".to_string(),
            UserError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            UserError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UserError {}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        UserError::validation(err.field(), err.to_string())
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => UserError::Forbidden,
            ErrorCode::DuplicateEmail => UserError::DuplicateEmail(
                err.details.get("email").cloned().unwrap_or_default(),
            ),
            ErrorCode::ValidationFailed => UserError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => UserError::Infrastructure(err.to_string()),
        }
    }
}
