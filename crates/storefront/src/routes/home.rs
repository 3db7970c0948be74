//! Home page route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::routes::products::{ProductListQuery, ProductListResponse, paginate};
use crate::state::AppState;

/// Home page: the first page of the unfiltered catalog.
///
/// Every visit re-fetches; under the stale-while-fresh policy there is no
/// cached product list to fall back on.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<ProductListResponse>> {
    let api = state.api().clone();
    let products = state
        .catalog_query()
        .run((), || async move { api.list_products(None).await })
        .await?;

    Ok(Json(paginate(products, &ProductListQuery::default())))
}
