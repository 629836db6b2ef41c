//! HTTP handlers for user endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};

use crate::adapters::http::middleware::{RequestMetadata, RequireAuth};
use crate::adapters::http::response::{
    internal_error, parse_id, validation_failed, ApiResponse, ErrorResponse, ListParams,
    PaginatedResponse,
};
use crate::application::handlers::user::{
    CreateUserHandler, DeleteUserCommand, DeleteUserHandler, GetUserHandler, GetUserQuery,
    ListUsersHandler, ListUsersQuery, UpdateUserHandler,
};
use crate::domain::foundation::UserId;
use crate::domain::user::UserError;
use crate::ports::USER_SORT_FIELDS;

use super::dto::{UserRequest, UserResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct UserHandlers {
    pub create: Arc<CreateUserHandler>,
    pub get: Arc<GetUserHandler>,
    pub list: Arc<ListUsersHandler>,
    pub update: Arc<UpdateUserHandler>,
    pub delete: Arc<DeleteUserHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/users - Register a user (public)
pub async fn create_user(
    State(handlers): State<UserHandlers>,
    RequestMetadata(metadata): RequestMetadata,
    Json(req): Json<UserRequest>,
) -> Response {
    let cmd = match req.into_create_command() {
        Ok(cmd) => cmd,
        Err(e) => return validation_failed(e.field(), e.to_string()),
    };

    match handlers.create.handle(cmd, metadata).await {
        Ok(view) => ApiResponse::created("User created successfully", UserResponse::from(view)),
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/users/:id
pub async fn get_user(
    State(handlers): State<UserHandlers>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let user_id: UserId = match parse_id(&id, "user") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get.handle(GetUserQuery { user_id }).await {
        Ok(view) => ApiResponse::ok("User retrieved successfully", UserResponse::from(view)),
        Err(e) => handle_user_error(e),
    }
}

/// GET /api/users
pub async fn list_users(
    State(handlers): State<UserHandlers>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ListParams>,
) -> Response {
    let page = match params.into_page_request(USER_SORT_FIELDS) {
        Ok(page) => page,
        Err(response) => return response,
    };

    match handlers.list.handle(ListUsersQuery { page }).await {
        Ok(page) => PaginatedResponse::<UserResponse>::from_page(page).ok(),
        Err(e) => handle_user_error(e),
    }
}

/// PUT /api/users/:id
pub async fn update_user(
    State(handlers): State<UserHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Path(id): Path<String>,
    Json(req): Json<UserRequest>,
) -> Response {
    let user_id: UserId = match parse_id(&id, "user") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let cmd = match req.into_update_command(user_id) {
        Ok(cmd) => cmd,
        Err(e) => return validation_failed(e.field(), e.to_string()),
    };

    match handlers.update.handle(cmd, metadata).await {
        Ok(view) => ApiResponse::ok("User updated successfully", UserResponse::from(view)),
        Err(e) => handle_user_error(e),
    }
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(handlers): State<UserHandlers>,
    RequireAuth(_user): RequireAuth,
    RequestMetadata(metadata): RequestMetadata,
    Path(id): Path<String>,
) -> Response {
    let user_id: UserId = match parse_id(&id, "user") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.delete.handle(DeleteUserCommand { user_id }, metadata).await {
        Ok(view) => ApiResponse::ok("User deleted successfully", UserResponse::from(view)),
        Err(e) => handle_user_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_user_error(error: UserError) -> Response {
    match error {
        UserError::NotFound(id) => {
            ErrorResponse::not_found("User", &id.to_string()).respond(StatusCode::NOT_FOUND)
        }
        UserError::DuplicateEmail(email) => {
            ErrorResponse::conflict(format!("Email already registered: {}", email))
                .respond(StatusCode::CONFLICT)
        }
        UserError::Forbidden => {
            ErrorResponse::forbidden("Permission denied").respond(StatusCode::FORBIDDEN)
        }
        UserError::ValidationFailed { field, message } => validation_failed(&field, message),
        UserError::Infrastructure(msg) => internal_error(&msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_user_error(UserError::NotFound(UserId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_email_maps_to_409() {
        let response = handle_user_error(UserError::DuplicateEmail("a@b.com".to_string()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn forbidden_maps_to_403() {
        assert_eq!(handle_user_error(UserError::Forbidden).status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_user_error(UserError::Infrastructure("pool timed out".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
