//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home: first page of the catalog
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Filtered, paginated product listing
//! GET  /products/categories    - Category list
//! GET  /products/{id}          - Product detail
//!
//! # Users
//! GET  /users/{id}             - Account detail (read-only)
//!
//! # Cart (session-scoped)
//! GET  /cart                   - Cart view
//! POST /cart/add               - Add item (upstream call, then local upsert)
//! POST /cart/update            - Set line quantity
//! POST /cart/remove            - Remove a whole line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Item count badge
//!
//! # Checkout
//! GET  /checkout               - Placeholder (501)
//!
//! # Notifications
//! GET  /notifications          - Drain pending one-shot notifications
//! ```

pub mod cart;
pub mod home;
pub mod notifications;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/categories", get(products::categories))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // User routes
        .route("/users/{id}", get(users::show))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout placeholder
        .route("/checkout", get(cart::checkout))
        // Pending one-shot notifications
        .route("/notifications", get(notifications::drain))
}
