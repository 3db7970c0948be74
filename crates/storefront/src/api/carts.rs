//! Cart CRUD against the upstream shop API.
//!
//! The demo upstream acknowledges mutations without persisting them, so the
//! session-local reducer in `state::cart` remains the source of truth for
//! what the shopper sees. These calls still happen on every mutation: the
//! contract is API-first, local-apply-second.

use chrono::Utc;
use marigold_core::{CartId, UserId};
use tracing::instrument;

use super::{ApiError, CartLineEntry, CartPayload, CartSnapshot, ShopApiClient};

impl ShopApiClient {
    /// List all carts recorded upstream for a user.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive id (no network call),
    /// or the mapped upstream failure.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn list_user_carts(&self, user_id: UserId) -> Result<Vec<CartSnapshot>, ApiError> {
        if !user_id.is_valid() {
            return Err(ApiError::validation(
                "user_id",
                "user id must be a positive integer",
            ));
        }
        self.get_json(&format!("carts/user/{user_id}")).await
    }

    /// Record a new cart upstream.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive user id or an empty
    /// line list, or the mapped upstream failure.
    #[instrument(skip(self, lines), fields(user_id = %user_id, lines = lines.len()))]
    pub async fn add_cart(
        &self,
        user_id: UserId,
        lines: Vec<CartLineEntry>,
    ) -> Result<CartSnapshot, ApiError> {
        if !user_id.is_valid() {
            return Err(ApiError::validation(
                "user_id",
                "user id must be a positive integer",
            ));
        }
        if lines.is_empty() {
            return Err(ApiError::validation(
                "products",
                "a cart needs at least one line",
            ));
        }

        let payload = CartPayload {
            user_id,
            date: Utc::now(),
            products: lines,
        };
        self.post_json("carts", &payload).await
    }

    /// Replace the lines of an upstream cart.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive cart id (no network
    /// call), or the mapped upstream failure.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id, lines = lines.len()))]
    pub async fn update_cart(
        &self,
        cart_id: CartId,
        user_id: UserId,
        lines: Vec<CartLineEntry>,
    ) -> Result<CartSnapshot, ApiError> {
        if !cart_id.is_valid() {
            return Err(ApiError::validation(
                "cart_id",
                "cart id must be a positive integer",
            ));
        }

        let payload = CartPayload {
            user_id,
            date: Utc::now(),
            products: lines,
        };
        self.put_json(&format!("carts/{cart_id}"), &payload).await
    }

    /// Delete an upstream cart.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive cart id (no network
    /// call), or the mapped upstream failure.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn remove_cart(&self, cart_id: CartId) -> Result<(), ApiError> {
        if !cart_id.is_valid() {
            return Err(ApiError::validation(
                "cart_id",
                "cart id must be a positive integer",
            ));
        }
        self.delete(&format!("carts/{cart_id}")).await
    }
}
