//! HTTP adapter for sign-in.

mod handlers;

pub use handlers::{auth_routes, AuthHandlers, SignInRequest, SignInResponse};
