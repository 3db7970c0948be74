//! Domain types for the upstream shop API.
//!
//! These mirror the upstream JSON shapes. Entities are immutable once
//! fetched and ephemeral: nothing here is persisted, every navigation
//! re-fetches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use marigold_core::{CartId, Price, ProductId, UserId};

// =============================================================================
// Product Types
// =============================================================================

/// Aggregate review rating for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating value (e.g., 4.5).
    pub rate: f64,
    /// Total number of reviews.
    pub count: u64,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Plain text description.
    pub description: String,
    /// Category name (e.g., "electronics").
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Review rating.
    pub rating: Rating,
}

// =============================================================================
// User Types
// =============================================================================

/// Geographic coordinates, as the upstream sends them (strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geolocation {
    pub lat: String,
    pub long: String,
}

/// Postal address with nested geolocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub number: i64,
    pub zipcode: String,
    pub geolocation: Geolocation,
}

/// A person's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub firstname: String,
    pub lastname: String,
}

/// A shop account. Read-only from the storefront's perspective.
///
/// The upstream demo API sends the password in clear; it is kept for wire
/// fidelity but skipped on serialization and redacted from `Debug` so it can
/// never leak into responses or logs.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Login name.
    pub username: String,
    /// Upstream-provided credential; never re-serialized.
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Full name.
    pub name: Name,
    /// Postal address.
    pub address: Address,
    /// Phone number.
    pub phone: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("phone", &self.phone)
            .finish()
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// One product/quantity pair inside an upstream cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineEntry {
    /// Referenced product.
    pub product_id: ProductId,
    /// Quantity, at least 1.
    pub quantity: u32,
}

/// An upstream cart record.
///
/// At most one entry per product id; the reducer in `state::cart` enforces
/// the same invariant on the session-local side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Cart ID.
    pub id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// When the cart was recorded upstream.
    pub date: DateTime<Utc>,
    /// Product/quantity entries.
    pub products: Vec<CartLineEntry>,
}

/// Payload for cart create/update calls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    /// Owning user.
    pub user_id: UserId,
    /// When the cart was assembled.
    pub date: DateTime<Utc>,
    /// Product/quantity entries.
    pub products: Vec<CartLineEntry>,
}
