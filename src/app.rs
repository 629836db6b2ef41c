//! Composition root: wires repositories and adapters into the HTTP state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::auth::JwtTokenService;
use crate::adapters::http::{
    ApiState, AuthHandlers, CartHandlers, ProductHandlers, SaleHandlers, UserHandlers,
};
use crate::adapters::memory::{
    InMemoryCartRepository, InMemoryProductRepository, InMemorySaleRepository,
    InMemoryUserRepository,
};
use crate::adapters::postgres::{
    PostgresCartRepository, PostgresProductRepository, PostgresSaleRepository,
    PostgresUserRepository,
};
use crate::application::handlers::auth::AuthenticateHandler;
use crate::application::handlers::cart::{
    CreateCartHandler, DeleteCartHandler, GetCartHandler, ListCartsHandler, UpdateCartHandler,
};
use crate::application::handlers::product::{
    CreateProductHandler, DeleteProductHandler, GetProductHandler, ListCategoriesHandler,
    ListProductsByCategoryHandler, ListProductsHandler, UpdateProductHandler,
};
use crate::application::handlers::sale::{
    CancelSaleHandler, CancelSaleItemHandler, CreateSaleHandler, DeleteSaleHandler,
    GetSaleHandler, ListSalesHandler, UpdateSaleHandler,
};
use crate::application::handlers::user::{
    CreateUserHandler, DeleteUserHandler, GetUserHandler, ListUsersHandler, UpdateUserHandler,
};
use crate::config::AuthConfig;
use crate::ports::{
    CartRepository, EventPublisher, PasswordHasher, ProductRepository, SaleRepository,
    UserRepository,
};

/// One repository per aggregate, all on the same backend.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub sales: Arc<dyn SaleRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            products: Arc::new(InMemoryProductRepository::new()),
            carts: Arc::new(InMemoryCartRepository::new()),
            sales: Arc::new(InMemorySaleRepository::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            products: Arc::new(PostgresProductRepository::new(pool.clone())),
            carts: Arc::new(PostgresCartRepository::new(pool.clone())),
            sales: Arc::new(PostgresSaleRepository::new(pool)),
        }
    }
}

/// Builds every handler bundle over the given repositories.
///
/// The JWT service both issues tokens at sign-in and validates them in the
/// auth middleware.
pub fn build_api_state(
    repositories: Repositories,
    auth: &AuthConfig,
    password_hasher: Arc<dyn PasswordHasher>,
    event_publisher: Arc<dyn EventPublisher>,
) -> ApiState {
    let Repositories {
        users,
        products,
        carts,
        sales,
    } = repositories;
    let tokens = Arc::new(JwtTokenService::new(
        &auth.jwt_secret,
        auth.jwt_issuer.clone(),
        auth.token_ttl_minutes,
    ));

    ApiState {
        auth: AuthHandlers {
            authenticate: Arc::new(AuthenticateHandler::new(
                users.clone(),
                password_hasher.clone(),
                tokens.clone(),
            )),
        },
        users: UserHandlers {
            create: Arc::new(CreateUserHandler::new(users.clone(), password_hasher.clone())),
            get: Arc::new(GetUserHandler::new(users.clone())),
            list: Arc::new(ListUsersHandler::new(users.clone())),
            update: Arc::new(UpdateUserHandler::new(users.clone(), password_hasher)),
            delete: Arc::new(DeleteUserHandler::new(users.clone())),
        },
        products: ProductHandlers {
            create: Arc::new(CreateProductHandler::new(products.clone())),
            get: Arc::new(GetProductHandler::new(products.clone())),
            list: Arc::new(ListProductsHandler::new(products.clone())),
            list_by_category: Arc::new(ListProductsByCategoryHandler::new(products.clone())),
            categories: Arc::new(ListCategoriesHandler::new(products.clone())),
            update: Arc::new(UpdateProductHandler::new(products.clone())),
            delete: Arc::new(DeleteProductHandler::new(products.clone())),
        },
        carts: CartHandlers {
            create: Arc::new(CreateCartHandler::new(
                carts.clone(),
                users.clone(),
                products.clone(),
            )),
            get: Arc::new(GetCartHandler::new(carts.clone())),
            list: Arc::new(ListCartsHandler::new(carts.clone())),
            update: Arc::new(UpdateCartHandler::new(carts.clone(), users, products)),
            delete: Arc::new(DeleteCartHandler::new(carts)),
        },
        sales: SaleHandlers {
            create: Arc::new(CreateSaleHandler::new(sales.clone(), event_publisher.clone())),
            get: Arc::new(GetSaleHandler::new(sales.clone())),
            list: Arc::new(ListSalesHandler::new(sales.clone())),
            update: Arc::new(UpdateSaleHandler::new(sales.clone(), event_publisher.clone())),
            cancel: Arc::new(CancelSaleHandler::new(sales.clone(), event_publisher.clone())),
            cancel_item: Arc::new(CancelSaleItemHandler::new(sales.clone(), event_publisher)),
            delete: Arc::new(DeleteSaleHandler::new(sales)),
        },
        validator: tokens,
    }
}
