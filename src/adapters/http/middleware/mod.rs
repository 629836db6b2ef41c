//! HTTP middleware for axum.
//!
//! - `auth` - Authentication middleware and extractors
//! - `request_context` - Command metadata from request ID and caller

pub mod auth;
pub mod request_context;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAuth};
pub use request_context::{RequestMetadata, REQUEST_ID_HEADER};
