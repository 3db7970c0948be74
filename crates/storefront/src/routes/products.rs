//! Product route handlers.
//!
//! Listing goes through the catalog reducer: the full product list is
//! fetched fresh (no cache), filters and pagination are applied locally,
//! and the current page slice is rendered. Detail lookups gate on id
//! validity before any upstream call is made.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use marigold_core::ProductId;

use crate::api::Product;
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::state::catalog::{CatalogAction, CatalogState, FilterConfig};

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    /// Search term over title and description.
    pub search: Option<String>,
    /// Comma-separated category names (set semantics).
    pub category: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// One page of the filtered catalog.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub page: u32,
    pub per_page: u32,
    pub total_items: u32,
    pub total_pages: u32,
    pub has_more_pages: bool,
}

/// Build the response page from a fetched list plus query parameters.
pub(crate) fn paginate(products: Vec<Product>, query: &ProductListQuery) -> ProductListResponse {
    let mut catalog = CatalogState::with_products(products);

    if let Some(per_page) = query.per_page {
        catalog.apply(CatalogAction::SetPageSize(per_page));
    }

    let categories = query
        .category
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    catalog.apply(CatalogAction::SetFilters(FilterConfig {
        search: query.search.clone().unwrap_or_default(),
        categories,
        price_range: None,
    }));

    if let Some(page) = query.page {
        catalog.apply(CatalogAction::SetPage(page));
    }

    let pagination = catalog.pagination();
    ProductListResponse {
        products: catalog.page_items().into_iter().cloned().collect(),
        page: pagination.page,
        per_page: pagination.page_size,
        total_items: pagination.total_items,
        total_pages: pagination.total_pages(),
        has_more_pages: pagination.has_more_pages(),
    }
}

/// Filtered, paginated product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>> {
    let api = state.api().clone();
    let products = state
        .catalog_query()
        .run((), || async move { api.list_products(None).await })
        .await?;

    Ok(Json(paginate(products, &query)))
}

/// Category list.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let api = state.api().clone();
    let categories = state
        .categories_query()
        .run((), || async move { api.list_categories().await })
        .await?;
    Ok(Json(categories))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    // Gate before the query ever runs: an invalid id is a client mistake,
    // not a fetch failure, so no query fires and no notification is queued.
    if !id.is_valid() {
        return Err(AppError::BadRequest(
            "product id must be a positive integer".to_string(),
        ));
    }

    let api = state.api().clone();
    let product = state
        .product_query()
        .run(id, || async move { api.get_product(id).await })
        .await?;
    Ok(Json(product))
}
