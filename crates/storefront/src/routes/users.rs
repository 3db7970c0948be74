//! User route handlers.
//!
//! Accounts are read-only upstream data; the password field is stripped at
//! the type level (see `api::types::User`) and can never appear here.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use marigold_core::UserId;

use crate::api::User;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Account detail.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<User>> {
    let id = UserId::new(id);
    if !id.is_valid() {
        return Err(AppError::BadRequest(
            "user id must be a positive integer".to_string(),
        ));
    }

    let api = state.api().clone();
    let user = state
        .user_query()
        .run(id, || async move { api.get_user(id).await })
        .await?;
    Ok(Json(user))
}
