//! Upstream shop API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`; one shared HTTP client behind an `Arc`
//! - The upstream is the source of truth - NO local cache, every call is a
//!   fresh fetch (stale-while-fresh policy)
//! - Exactly one attempt per call; retries are disabled everywhere
//! - All failures are converted into the closed [`ApiError`] taxonomy at
//!   this boundary so callers pattern-match instead of probing fields
//!
//! # Resources
//!
//! - Products: listing, detail by id, category list
//! - Users: detail by id
//! - Carts: list per user, create, update, delete
//!
//! # Example
//!
//! ```rust,ignore
//! use marigold_storefront::api::ShopApiClient;
//!
//! let client = ShopApiClient::new(&config.api_base_url);
//!
//! let products = client.list_products(None).await?;
//! let product = client.get_product(ProductId::new(5)).await?;
//! ```

mod client;
mod types;

pub mod carts;
pub mod products;
pub mod users;

pub use client::ShopApiClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the upstream shop API.
///
/// The taxonomy is closed on purpose: every caller can match exhaustively,
/// and no raw transport error ever escapes this module unwrapped.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or connectivity failure (DNS, refused connection, reset).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Curated user-facing message for this status.
        message: String,
    },

    /// Bad local input; no request was made.
    #[error("Validation error{}: {message}", field_suffix(.field))]
    Validation {
        /// The offending field, when known.
        field: Option<&'static str>,
        /// Description of what was wrong.
        message: String,
    },

    /// A user or product lookup came back empty.
    #[error("{resource} {id} not found")]
    NotFound {
        /// Which kind of entity was missing.
        resource: Resource,
        /// The id that was looked up.
        id: i64,
    },

    /// Anything unrecognized, including undecodable response bodies.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

/// Entity kinds that have specialized not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Product,
    User,
    Cart,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Product => "Product",
            Self::User => "User",
            Self::Cart => "Cart",
        };
        f.write_str(name)
    }
}

impl ApiError {
    /// Construct a validation error for a named field.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: Some(field),
            message: message.into(),
        }
    }

    /// Construct an HTTP error with the curated message for `status`.
    #[must_use]
    pub fn http(status: u16) -> Self {
        Self::Http {
            status,
            message: status_message(status).to_string(),
        }
    }

    /// A message safe and meaningful to show to a shopper.
    ///
    /// Never exposes transport internals; those stay in logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => {
                "Could not reach the shop. Check your connection and try again.".to_string()
            }
            Self::Http { message, .. } => message.clone(),
            Self::Validation { message, .. } => message.clone(),
            Self::NotFound { resource, .. } => match resource {
                Resource::Product => "We couldn't find that product.".to_string(),
                Resource::User => "We couldn't find that account.".to_string(),
                Resource::Cart => "We couldn't find that cart.".to_string(),
            },
            Self::Unknown(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Curated user-facing messages per HTTP status.
#[must_use]
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => "The request was invalid.",
        401 => "You need to sign in to do that.",
        403 => "You don't have access to that.",
        404 => "The requested resource was not found.",
        429 => "Too many requests - please slow down.",
        500 => "The shop had an internal problem.",
        503 => "The shop is temporarily unavailable.",
        _ => "The request failed. Please try again.",
    }
}

fn field_suffix(field: &Option<&'static str>) -> String {
    field.map_or_else(String::new, |f| format!(" ({f})"))
}
