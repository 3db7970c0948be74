//! Notification route handler.
//!
//! Draining is destructive on purpose: each notification is a transient
//! toast, delivered at most once.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::notify::Notification;
use crate::state::AppState;

/// Take every pending notification.
#[instrument(skip(state))]
pub async fn drain(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.notifier().drain())
}
