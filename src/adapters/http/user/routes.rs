//! HTTP routes for user endpoints.

use axum::{routing::get, Router};

use super::handlers::{create_user, delete_user, get_user, list_users, update_user, UserHandlers};

/// Creates the user router, mounted at `/api/users`.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .with_state(handlers)
}
