//! Product operations against the upstream shop API.

use marigold_core::ProductId;
use tracing::instrument;

use super::{ApiError, Product, Resource, ShopApiClient};

impl ShopApiClient {
    /// List products, optionally limited to the first `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; never retried.
    #[instrument(skip(self))]
    pub async fn list_products(&self, limit: Option<u32>) -> Result<Vec<Product>, ApiError> {
        let path = match limit {
            Some(0) => {
                return Err(ApiError::validation("limit", "limit must be greater than 0"));
            }
            Some(limit) => format!("products?limit={limit}"),
            None => "products".to_string(),
        };
        self.get_json(&path).await
    }

    /// Get a single product by id.
    ///
    /// Validates the id locally first: a non-positive id fails fast with a
    /// validation error and no network call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the product does not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        if !id.is_valid() {
            return Err(ApiError::validation(
                "product_id",
                "product id must be a positive integer",
            ));
        }

        let not_found = || ApiError::NotFound {
            resource: Resource::Product,
            id: id.get(),
        };

        // The demo upstream answers missing ids with a JSON `null` body
        // rather than a 404; treat both as not found.
        match self
            .get_json::<Option<Product>>(&format!("products/{id}"))
            .await
        {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(not_found()),
            Err(ApiError::Http { status: 404, .. }) => Err(not_found()),
            Err(e) => Err(e),
        }
    }

    /// List all product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("products/categories").await
    }
}
