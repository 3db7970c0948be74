//! Application state shared across handlers, plus the pure state reducers.
//!
//! The reducers ([`cart`], [`catalog`]) are plain data modules with explicit
//! action sets - no I/O, no framework types - so they can be unit-tested
//! without standing up a server. [`AppState`] wires them to the runtime.

pub mod cart;
pub mod catalog;

use std::sync::Arc;

use marigold_core::{ProductId, UserId};

use crate::api::{Product, ShopApiClient, User};
use crate::config::StorefrontConfig;
use crate::notify::Notifier;
use crate::query::Query;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the upstream API client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: ShopApiClient,
    notifier: Notifier,
    // One query cell per resource: independent, separately keyed, no
    // ordering between them.
    catalog_query: Query<(), Vec<Product>>,
    product_query: Query<ProductId, Product>,
    categories_query: Query<(), Vec<String>>,
    user_query: Query<UserId, User>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let api = ShopApiClient::new(&config.api_base_url);
        let notifier = Notifier::new();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                catalog_query: Query::new(notifier.clone()),
                product_query: Query::new(notifier.clone()),
                categories_query: Query::new(notifier.clone()),
                user_query: Query::new(notifier.clone()),
                notifier,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the upstream shop API client.
    #[must_use]
    pub fn api(&self) -> &ShopApiClient {
        &self.inner.api
    }

    /// Get a reference to the notification queue.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Query cell for the full product list.
    #[must_use]
    pub fn catalog_query(&self) -> &Query<(), Vec<Product>> {
        &self.inner.catalog_query
    }

    /// Query cell for single-product lookups.
    #[must_use]
    pub fn product_query(&self) -> &Query<ProductId, Product> {
        &self.inner.product_query
    }

    /// Query cell for the category list.
    #[must_use]
    pub fn categories_query(&self) -> &Query<(), Vec<String>> {
        &self.inner.categories_query
    }

    /// Query cell for user lookups.
    #[must_use]
    pub fn user_query(&self) -> &Query<UserId, User> {
        &self.inner.user_query
    }
}
