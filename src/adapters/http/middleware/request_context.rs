//! Builds `CommandMetadata` for application handlers from the request.
//!
//! The correlation ID is the `x-request-id` set by tower-http's request-id
//! layer; the actor is whatever `auth_middleware` injected.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::domain::foundation::{AuthenticatedUser, CommandMetadata};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extractor yielding metadata for the current request. Never rejects.
#[derive(Debug, Clone)]
pub struct RequestMetadata(pub CommandMetadata);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestMetadata
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let metadata = match parts.extensions.get::<AuthenticatedUser>() {
            Some(user) => CommandMetadata::for_user(user.clone()),
            None => CommandMetadata::anonymous(),
        }
        .with_source("http");

        let metadata = match parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            Some(id) => metadata.with_correlation_id(id),
            None => metadata,
        };

        Ok(RequestMetadata(metadata))
    }
}
