//! Shared helpers for Marigold integration tests.
//!
//! Tests stand up a `wiremock` server in place of the upstream shop API,
//! point a [`ShopApiClient`] or a full router at it, and assert on both the
//! storefront's responses and the requests the upstream actually saw.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;

use marigold_storefront::api::ShopApiClient;
use marigold_storefront::config::StorefrontConfig;
use marigold_storefront::middleware::create_session_layer;
use marigold_storefront::routes;
use marigold_storefront::state::AppState;

/// Build an API client pointed at `base_url`.
#[must_use]
pub fn api_client(base_url: &str) -> ShopApiClient {
    let url = Url::parse(base_url).expect("valid base url");
    ShopApiClient::new(&url)
}

/// Build the full storefront router (sessions included) against `base_url`.
///
/// Mirrors the production router minus the Sentry and trace layers, which
/// only add noise under test.
#[must_use]
pub fn storefront_app(base_url: &str) -> Router {
    let config = StorefrontConfig {
        api_base_url: Url::parse(base_url).expect("valid base url"),
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        sentry_dsn: None,
        sentry_environment: None,
    };
    let state = AppState::new(config);

    Router::new()
        .merge(routes::routes())
        .layer(create_session_layer())
        .with_state(state)
}

/// A storefront response plus the session cookie to carry forward.
pub struct TestResponse {
    pub status: u16,
    pub body: Value,
    pub cookie: Option<String>,
}

/// Send one request through the router, threading an optional session
/// cookie from an earlier response.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = app.clone().oneshot(request).await.expect("infallible");
    into_test_response(response).await
}

async fn into_test_response(response: Response<Body>) -> TestResponse {
    let status = response.status().as_u16();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(String::from);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };

    TestResponse {
        status,
        body,
        cookie,
    }
}

// =============================================================================
// Upstream Fixtures
// =============================================================================

/// A product in the upstream's wire shape.
#[must_use]
pub fn product_json(id: i64, title: &str, price: f64, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("Description of {title}"),
        "category": category,
        "image": format!("https://shop.example.test/images/{id}.jpg"),
        "rating": { "rate": 4.1, "count": 37 }
    })
}

/// The default four-product catalog used across tests.
#[must_use]
pub fn catalog_json() -> Value {
    json!([
        product_json(1, "Fjallraven Backpack", 109.95, "men's clothing"),
        product_json(2, "Mens Casual T-Shirt", 22.3, "men's clothing"),
        product_json(3, "Gold Petite Bracelet", 695.0, "jewelery"),
        product_json(4, "Portable Drive", 64.0, "electronics"),
    ])
}

/// A user in the upstream's wire shape.
#[must_use]
pub fn user_json(id: i64) -> Value {
    json!({
        "id": id,
        "email": "jo@example.test",
        "username": "jo",
        "password": "hunter2",
        "name": { "firstname": "Jo", "lastname": "March" },
        "address": {
            "city": "Concord",
            "street": "Orchard House",
            "number": 1,
            "zipcode": "01742",
            "geolocation": { "lat": "42.4604", "long": "-71.3489" }
        },
        "phone": "555-0100"
    })
}

/// An upstream cart record.
#[must_use]
pub fn cart_json(id: i64, user_id: i64, products: Value) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "date": "2026-08-25T00:00:00.000Z",
        "products": products
    })
}
