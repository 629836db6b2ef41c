//! End-to-end tests of the HTTP API over the in-memory backend.
//!
//! Every request goes through the full router: request IDs, the bearer
//! token middleware, handlers and repositories. Tokens are real HS256 JWTs
//! obtained from `POST /api/auth`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use backoffice::adapters::auth::Pbkdf2PasswordHasher;
use backoffice::adapters::events::InMemoryEventBus;
use backoffice::adapters::http::api_router;
use backoffice::app::{build_api_state, Repositories};
use backoffice::config::AuthConfig;
use backoffice::domain::foundation::{UserId, UserRole};
use backoffice::domain::user::{
    Address, Email, PersonName, Phone, User, UserDetails, UserStatus, Username,
};
use backoffice::ports::PasswordHasher;

const ADMIN_EMAIL: &str = "admin@shop.example.com";
const ADMIN_PASSWORD: &str = "Adm1n!secret";

struct TestApp {
    router: Router,
    events: Arc<InMemoryEventBus>,
}

impl TestApp {
    async fn new() -> Self {
        let repositories = Repositories::in_memory();
        let hasher = Arc::new(Pbkdf2PasswordHasher::new(10));
        let events = Arc::new(InMemoryEventBus::new());

        let admin = User::new(
            UserId::new(),
            UserDetails {
                username: Username::new("admin").unwrap(),
                email: Email::new(ADMIN_EMAIL).unwrap(),
                phone: Phone::new("+5511987654321").unwrap(),
                role: UserRole::Admin,
                status: UserStatus::Active,
                name: PersonName::new("Ada", "Admin").unwrap(),
                address: Address::default(),
            },
            hasher.hash(ADMIN_PASSWORD).unwrap(),
        )
        .unwrap();
        repositories.users.save(&admin).await.unwrap();

        let auth = AuthConfig {
            jwt_secret: SecretString::new("integration-test-secret-0123456789".to_string()),
            jwt_issuer: "backoffice".to_string(),
            token_ttl_minutes: 15,
        };
        let state = build_api_state(repositories, &auth, hasher, events.clone());

        Self {
            router: api_router(state),
            events,
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn sign_in(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "sign-in failed: {}", body);
        body["data"]["token"].as_str().unwrap().to_string()
    }

    async fn admin_token(&self) -> String {
        self.sign_in(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }
}

fn registration(email: &str) -> Value {
    json!({
        "username": "maria",
        "email": email,
        "password": "S3cure!pass",
        "phone": "+5511912345678",
        "name": { "firstname": "Maria", "lastname": "Silva" },
        "address": {
            "city": "Sao Paulo",
            "street": "Av. Paulista",
            "number": 1000,
            "zipcode": "01310-100",
            "geolocation": { "lat": "-23.56", "long": "-46.65" }
        }
    })
}

fn product(title: &str, category: &str, price: f64) -> Value {
    json!({
        "title": title,
        "price": price,
        "description": "",
        "category": category,
        "image": "https://img.example.com/p.png",
        "rating": { "rate": 4.5, "count": 10 }
    })
}

#[tokio::test]
async fn health_needs_no_token() {
    let app = TestApp::new().await;
    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_reject_missing_and_bad_tokens() {
    let app = TestApp::new().await;

    let (status, _) = app.send("GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send("GET", "/api/products", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["code"].is_string());
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    let (status, _) = app
        .send(
            "POST",
            "/api/auth",
            None,
            Some(json!({ "email": ADMIN_EMAIL, "password": "Wr0ng!password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_then_sign_in_as_customer() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send("POST", "/api/users", None, Some(registration("maria@example.com")))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["role"], "Customer");
    assert!(body["data"].get("password").is_none());

    let (status, _) = app
        .send("POST", "/api/users", None, Some(registration("MARIA@example.com")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let token = app.sign_in("maria@example.com", "S3cure!pass").await;

    // Customers cannot manage the catalog
    let (status, _) = app
        .send(
            "POST",
            "/api/products",
            Some(&token),
            Some(product("Backpack", "bags", 109.95)),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn catalog_crud_and_categories() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    for (title, category, price) in [
        ("Backpack", "bags", 109.95),
        ("Jacket", "clothing", 55.99),
        ("T-shirt", "clothing", 22.3),
    ] {
        let (status, body) = app
            .send(
                "POST",
                "/api/products",
                Some(&token),
                Some(product(title, category, price)),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
    }

    let (status, body) = app
        .send("GET", "/api/products/categories", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!(["bags", "clothing"]));

    let (status, body) = app
        .send(
            "GET",
            "/api/products/category/clothing?_order=price%20desc",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 2);
    assert_eq!(body["data"][0]["title"], "Jacket");

    let (status, body) = app
        .send("GET", "/api/products?_page=2&_size=2", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_page"], 2);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .send("GET", "/api/products?_order=color", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send("GET", "/api/products/not-a-uuid", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cart_must_reference_existing_user_and_products() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (_, user) = app
        .send("POST", "/api/users", None, Some(registration("cart.owner@example.com")))
        .await;
    let user_id = user["data"]["id"].as_str().unwrap().to_string();

    let (_, created) = app
        .send(
            "POST",
            "/api/products",
            Some(&token),
            Some(product("Mug", "kitchen", 9.5)),
        )
        .await;
    let product_id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(
            "POST",
            "/api/carts",
            Some(&token),
            Some(json!({
                "user_id": user_id,
                "products": [
                    { "product_id": product_id, "quantity": 2 },
                    { "product_id": product_id, "quantity": 1 }
                ]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["products"][0]["quantity"], 3);

    let (status, _) = app
        .send(
            "POST",
            "/api/carts",
            Some(&token),
            Some(json!({
                "user_id": uuid::Uuid::new_v4().to_string(),
                "products": [{ "product_id": product_id, "quantity": 1 }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sale_lifecycle_applies_discounts_and_publishes_events() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let first_product = uuid::Uuid::new_v4().to_string();
    let second_product = uuid::Uuid::new_v4().to_string();
    let sale = json!({
        "sale_number": "S-2024-0001",
        "customer_id": uuid::Uuid::new_v4().to_string(),
        "customer_name": "Maria Silva",
        "branch_id": uuid::Uuid::new_v4().to_string(),
        "branch_name": "Downtown",
        "items": [
            { "product_id": first_product, "product_name": "Coffee", "quantity": 5, "unit_price": 20.0 },
            { "product_id": second_product, "product_name": "Filter", "quantity": 10, "unit_price": 5.0 }
        ]
    });

    // 5 x 20.00 - 10% = 90.00, 10 x 5.00 - 20% = 40.00
    let (status, body) = app
        .send("POST", "/api/sales", Some(&token), Some(sale.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["total_amount"], 130.0);
    assert_eq!(body["data"]["items"][0]["discount"], 10.0);
    let sale_id = body["data"]["id"].as_str().unwrap().to_string();
    let item_id = body["data"]["items"][1]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .send("POST", "/api/sales", Some(&token), Some(sale))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/sales/{}/items/{}/cancel", sale_id, item_id),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_amount"], 90.0);
    assert_eq!(body["data"]["items"][1]["is_cancelled"], true);

    let (status, body) = app
        .send("POST", &format!("/api/sales/{}/cancel", sale_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_cancelled"], true);

    let (status, _) = app
        .send("POST", &format!("/api/sales/{}/cancel", sale_id), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let event_types: Vec<String> = app
        .events
        .published_events()
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        event_types,
        vec![
            "sale.created.v1",
            "sale.item_cancelled.v1",
            "sale.cancelled.v1"
        ]
    );
}

#[tokio::test]
async fn sale_with_too_many_identical_items_is_rejected() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .send(
            "POST",
            "/api/sales",
            Some(&token),
            Some(json!({
                "sale_number": "S-9",
                "customer_id": uuid::Uuid::new_v4().to_string(),
                "customer_name": "Maria Silva",
                "branch_id": uuid::Uuid::new_v4().to_string(),
                "branch_name": "Downtown",
                "items": [
                    { "product_id": uuid::Uuid::new_v4().to_string(), "product_name": "Coffee", "quantity": 21, "unit_price": 1.0 }
                ]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

fn single_item_sale(customer_id: &str, quantity: i64) -> Value {
    json!({
        "sale_number": "S-10",
        "customer_id": customer_id,
        "customer_name": "Maria Silva",
        "branch_id": uuid::Uuid::new_v4().to_string(),
        "branch_name": "Downtown",
        "items": [
            { "product_id": uuid::Uuid::new_v4().to_string(), "product_name": "Coffee", "quantity": quantity, "unit_price": 1.0 }
        ]
    })
}

#[tokio::test]
async fn malformed_sale_body_values_are_validation_errors() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .send("POST", "/api/sales", Some(&token), Some(single_item_sale("not-a-uuid", 1)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "customer_id");

    let customer = uuid::Uuid::new_v4().to_string();
    let (status, body) = app
        .send("POST", "/api/sales", Some(&token), Some(single_item_sale(&customer, -1)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "items.quantity");
}

#[tokio::test]
async fn negative_cart_quantity_is_a_validation_error() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .send(
            "POST",
            "/api/carts",
            Some(&token),
            Some(json!({
                "user_id": uuid::Uuid::new_v4().to_string(),
                "products": [{ "product_id": uuid::Uuid::new_v4().to_string(), "quantity": -1 }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["details"]["field"], "products.quantity");
}
