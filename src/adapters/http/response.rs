//! Response envelopes and helpers shared by every resource.
//!
//! Successful single-resource calls return `ApiResponse`, lists return
//! `PaginatedResponse`, failures return `ErrorResponse`.

use std::str::FromStr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Page, PageRequest, ValidationError};

// ════════════════════════════════════════════════════════════════════════════
// Success envelopes
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    /// 200 with this envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Response {
        (StatusCode::OK, Json(Self::new(message, data))).into_response()
    }

    /// 201 with this envelope.
    pub fn created(message: impl Into<String>, data: T) -> Response {
        (StatusCode::CREATED, Json(Self::new(message, data))).into_response()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub total_items: u64,
    pub current_page: u32,
    pub total_pages: u32,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Converts each item of a page into its response shape.
    pub fn from_page<V>(page: Page<V>) -> Self
    where
        T: From<V>,
    {
        Self {
            success: true,
            total_items: page.total_items,
            current_page: page.current_page,
            total_pages: page.total_pages,
            data: page.items.into_iter().map(T::from).collect(),
        }
    }

    pub fn ok(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::new("VALIDATION_FAILED", message)
            .with_details(serde_json::json!({ "field": field }))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new("INVALID_STATE", message)
    }

    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "An internal error occurred")
    }

    pub fn respond(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// 400 naming the offending field.
pub fn validation_failed(field: &str, message: impl Into<String>) -> Response {
    ErrorResponse::validation(field, message).respond(StatusCode::BAD_REQUEST)
}

/// 500 with a generic body; the real cause only goes to the log.
pub fn internal_error(cause: &str) -> Response {
    tracing::error!(error = %cause, "request failed");
    ErrorResponse::internal().respond(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Parses an ID path segment, answering 400 when malformed.
pub fn parse_id<T: FromStr>(raw: &str, resource_type: &str) -> Result<T, Response> {
    raw.parse::<T>().map_err(|_| {
        ErrorResponse::bad_request(format!("Invalid {} ID: {}", resource_type, raw))
            .respond(StatusCode::BAD_REQUEST)
    })
}

/// Parses an ID carried in a request body.
pub fn body_id<T: FromStr>(raw: &str, field: &str) -> Result<T, ValidationError> {
    raw.parse::<T>()
        .map_err(|_| ValidationError::invalid_format(field, "must be a UUID"))
}

/// Narrows a JSON integer to a non-negative count.
pub fn body_count(value: i64, field: &str) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .map_err(|_| ValidationError::out_of_range(field, 0, i64::from(u32::MAX), value))
}

// ════════════════════════════════════════════════════════════════════════════
// List parameters
// ════════════════════════════════════════════════════════════════════════════

/// `?_page=2&_size=20&_order=price desc, title`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "_page", default)]
    pub page: Option<u32>,
    #[serde(rename = "_size", default)]
    pub size: Option<u32>,
    #[serde(rename = "_order", default)]
    pub order: Option<String>,
}

impl ListParams {
    pub fn into_page_request(self, sortable: &[&'static str]) -> Result<PageRequest, Response> {
        PageRequest::parse(self.page, self.size, self.order.as_deref(), sortable)
            .map_err(|e| validation_failed(e.field(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProductId;

    #[test]
    fn body_id_rejects_malformed_uuid() {
        let err = body_id::<ProductId>("not-a-uuid", "items.product_id").unwrap_err();
        assert_eq!(err.field(), "items.product_id");
    }

    #[test]
    fn body_count_rejects_negative_values() {
        assert_eq!(body_count(3, "quantity"), Ok(3));
        let err = body_count(-1, "quantity").unwrap_err();
        assert_eq!(err.field(), "quantity");
    }

    #[test]
    fn list_params_use_underscore_names() {
        let params: ListParams =
            serde_json::from_str(r#"{"_page": 2, "_size": 5, "_order": "title desc"}"#).unwrap();
        let request = params.into_page_request(&["title"]).unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, 5);
        assert_eq!(request.order.len(), 1);
    }

    #[test]
    fn unknown_order_field_is_400() {
        let params = ListParams {
            order: Some("password".to_string()),
            ..Default::default()
        };
        let response = params.into_page_request(&["title"]).unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_id_is_400() {
        let result = parse_id::<crate::domain::foundation::UserId>("not-a-uuid", "user");
        assert_eq!(result.unwrap_err().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn paginated_response_maps_items() {
        let page = Page::new(vec![1u32, 2], 7, &PageRequest { page: 1, size: 2, order: vec![] });
        let response: PaginatedResponse<u64> = PaginatedResponse::from_page(page);
        assert_eq!(response.data, vec![1u64, 2]);
        assert_eq!(response.total_pages, 4);
    }

    #[test]
    fn internal_error_hides_cause() {
        let body = serde_json::to_value(ErrorResponse::internal()).unwrap();
        assert_eq!(body["message"], "An internal error occurred");
        assert!(body.get("details").is_none());
    }
}
