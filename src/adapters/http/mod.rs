//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own HTTP adapter; `api_router` nests them under
//! `/api` behind the bearer-token middleware.

pub mod auth;
pub mod cart;
pub mod middleware;
pub mod product;
pub mod response;
pub mod sale;
pub mod user;

use axum::{http::HeaderName, routing::get, Json, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use auth::{auth_routes, AuthHandlers};
pub use cart::{cart_routes, CartHandlers};
pub use product::{product_routes, ProductHandlers};
pub use sale::{sale_routes, SaleHandlers};
pub use user::{user_routes, UserHandlers};

use middleware::{auth_middleware, AuthState, REQUEST_ID_HEADER};

/// Every handler bundle the API serves, plus the token validator.
#[derive(Clone)]
pub struct ApiState {
    pub auth: AuthHandlers,
    pub users: UserHandlers,
    pub products: ProductHandlers,
    pub carts: CartHandlers,
    pub sales: SaleHandlers,
    pub validator: AuthState,
}

/// Builds the full application router.
///
/// # Routes
///
/// - `GET /health` - liveness
/// - `/api/auth` - sign in
/// - `/api/users`, `/api/products`, `/api/carts`, `/api/sales` - resources
///
/// Request IDs are generated when missing and echoed back on the response.
pub fn api_router(state: ApiState) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes(state.auth))
        .nest("/users", user_routes(state.users))
        .nest("/products", product_routes(state.products))
        .nest("/carts", cart_routes(state.carts))
        .nest("/sales", sale_routes(state.sales))
        .layer(axum::middleware::from_fn_with_state(
            state.validator,
            auth_middleware,
        ));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
