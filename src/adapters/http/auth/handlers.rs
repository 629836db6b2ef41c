//! `POST /api/auth` - exchange credentials for an access token.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::adapters::http::response::{internal_error, ApiResponse, ErrorResponse};
use crate::application::handlers::auth::{
    AuthenticateCommand, AuthenticateHandler, AuthenticateResult, AuthenticationError,
};

#[derive(Clone)]
pub struct AuthHandlers {
    pub authenticate: Arc<AuthenticateHandler>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<AuthenticateResult> for SignInResponse {
    fn from(result: AuthenticateResult) -> Self {
        Self {
            token: result.token,
            token_type: "Bearer",
            expires_in: result.expires_in_secs,
            email: result.email,
            name: result.name,
            role: result.role.to_string(),
        }
    }
}

/// Creates the sign-in router, mounted at `/api/auth`.
pub fn auth_routes(handlers: AuthHandlers) -> Router {
    Router::new()
        .route("/", post(sign_in))
        .with_state(handlers)
}

pub async fn sign_in(
    State(handlers): State<AuthHandlers>,
    Json(req): Json<SignInRequest>,
) -> Response {
    let cmd = AuthenticateCommand {
        email: req.email,
        password: req.password,
    };

    match handlers.authenticate.handle(cmd).await {
        Ok(result) => ApiResponse::ok("User authenticated successfully", SignInResponse::from(result)),
        Err(e) => handle_auth_error(e),
    }
}

fn handle_auth_error(error: AuthenticationError) -> Response {
    match error {
        AuthenticationError::InvalidCredentials => {
            ErrorResponse::unauthorized(error.to_string()).respond(StatusCode::UNAUTHORIZED)
        }
        AuthenticationError::Inactive(_) => {
            ErrorResponse::forbidden(error.to_string()).respond(StatusCode::FORBIDDEN)
        }
        AuthenticationError::Infrastructure(msg) => internal_error(&msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_map_to_401() {
        let response = handle_auth_error(AuthenticationError::InvalidCredentials);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn inactive_account_maps_to_403() {
        let response = handle_auth_error(AuthenticationError::Inactive("Suspended".to_string()));
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
