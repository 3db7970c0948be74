//! Cart route handlers.
//!
//! The session cart is the shopper-visible truth; the upstream cart API is
//! called FIRST on every mutation, and the local reducer action is applied
//! only after the upstream acknowledged. A failed mutation therefore leaves
//! the last-good cart intact and surfaces as a single transient
//! notification, never as a lost cart.
//!
//! The demo upstream has no authentication, so upstream cart records are
//! filed under a fixed demo account.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use marigold_core::{CartId, Price, ProductId, UserId};

use crate::api::{ApiError, CartLineEntry};
use crate::error::{AppError, Result};
use crate::notify::Notification;
use crate::state::AppState;
use crate::state::cart::{CartAction, CartLine, CartState};

/// Upstream account all session carts are recorded under.
const DEMO_USER_ID: UserId = UserId::new(1);

/// Session keys for cart storage.
mod session_keys {
    /// The serialized [`CartState`](super::CartState).
    pub const CART: &str = "cart";
    /// The upstream cart id, once a mutation has been acknowledged.
    pub const CART_ID: &str = "cart_id";
}

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub unit_price_display: String,
    pub line_total: Price,
    pub line_total_display: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let line_total = line.line_total();
        Self {
            product_id: line.product_id,
            title: line.title.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            unit_price_display: line.unit_price.display(),
            line_total,
            line_total_display: line_total.display(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub subtotal: Price,
    pub subtotal_display: String,
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        let subtotal = cart.subtotal();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            subtotal,
            subtotal_display: subtotal.display(),
        }
    }
}

/// Mutation response: the (possibly unchanged) cart plus an outcome flag.
#[derive(Debug, Serialize)]
pub struct CartMutationResponse {
    pub ok: bool,
    pub cart: CartView,
}

// =============================================================================
// Form Types
// =============================================================================

/// Add to cart payload.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    pub quantity: Option<u32>,
}

/// Update quantity payload.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i64,
    pub quantity: u32,
}

/// Remove line payload.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
}

// =============================================================================
// Session Helpers
// =============================================================================

async fn load_cart(session: &Session) -> Result<CartState> {
    session
        .get::<CartState>(session_keys::CART)
        .await
        .map_err(|e| AppError::Internal(format!("session load failed: {e}")))
        .map(Option::unwrap_or_default)
}

async fn save_cart(session: &Session, cart: &CartState) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("session save failed: {e}")))
}

async fn load_cart_id(session: &Session) -> Result<Option<CartId>> {
    session
        .get::<CartId>(session_keys::CART_ID)
        .await
        .map_err(|e| AppError::Internal(format!("session load failed: {e}")))
}

async fn save_cart_id(session: &Session, cart_id: Option<CartId>) -> Result<()> {
    match cart_id {
        Some(id) => session
            .insert(session_keys::CART_ID, id)
            .await
            .map_err(|e| AppError::Internal(format!("session save failed: {e}"))),
        None => session
            .remove::<CartId>(session_keys::CART_ID)
            .await
            .map(|_| ())
            .map_err(|e| AppError::Internal(format!("session save failed: {e}"))),
    }
}

// =============================================================================
// Upstream Mediation
// =============================================================================

fn entries(cart: &CartState) -> Vec<CartLineEntry> {
    cart.lines()
        .iter()
        .map(|line| CartLineEntry {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect()
}

/// Push the prospective cart contents upstream.
///
/// Creates, updates, or deletes the upstream record depending on whether one
/// exists and whether any lines remain. Returns the upstream id to keep in
/// the session (None once the record is gone).
async fn sync_upstream(
    state: &AppState,
    cart_id: Option<CartId>,
    lines: Vec<CartLineEntry>,
) -> std::result::Result<Option<CartId>, ApiError> {
    match (cart_id, lines.is_empty()) {
        (Some(id), true) => {
            state.api().remove_cart(id).await?;
            Ok(None)
        }
        (Some(id), false) => {
            let snapshot = state.api().update_cart(id, DEMO_USER_ID, lines).await?;
            Ok(Some(snapshot.id))
        }
        (None, true) => Ok(None),
        (None, false) => {
            let snapshot = state.api().add_cart(DEMO_USER_ID, lines).await?;
            Ok(Some(snapshot.id))
        }
    }
}

/// Run one cart mutation: upstream first, local commit second.
///
/// On upstream failure the last-good cart is preserved and the error
/// surfaces as one notification; the response still carries the current
/// cart so the client can re-render.
async fn mediate(
    state: &AppState,
    session: &Session,
    cart: CartState,
    action: CartAction,
    success_message: &str,
) -> Result<Json<CartMutationResponse>> {
    let mut prospective = cart.clone();
    prospective.apply(action);

    // Nothing changed (e.g., removing an absent line): no upstream call.
    if prospective == cart {
        return Ok(Json(CartMutationResponse {
            ok: true,
            cart: CartView::from(&cart),
        }));
    }

    let cart_id = load_cart_id(session).await?;
    match sync_upstream(state, cart_id, entries(&prospective)).await {
        Ok(new_cart_id) => {
            save_cart(session, &prospective).await?;
            save_cart_id(session, new_cart_id).await?;
            state
                .notifier()
                .push(Notification::success(success_message));
            Ok(Json(CartMutationResponse {
                ok: true,
                cart: CartView::from(&prospective),
            }))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Cart mutation failed; keeping last-good cart");
            state.notifier().push(Notification::error(e.user_message()));
            Ok(Json(CartMutationResponse {
                ok: false,
                cart: CartView::from(&cart),
            }))
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Cart view.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add an item: snapshot the price from a fresh product fetch, record
/// upstream, then upsert locally.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartMutationResponse>> {
    let product_id = ProductId::new(form.product_id);
    if !product_id.is_valid() {
        return Err(AppError::BadRequest(
            "product id must be a positive integer".to_string(),
        ));
    }
    let quantity = form.quantity.unwrap_or(1);
    let cart = load_cart(&session).await?;

    // Price snapshot is taken now, at add time.
    let api = state.api().clone();
    let product = match state
        .product_query()
        .run(product_id, || async move { api.get_product(product_id).await })
        .await
    {
        Ok(product) => product,
        Err(ApiError::Validation { .. }) => {
            return Err(AppError::BadRequest(
                "product id must be a positive integer".to_string(),
            ));
        }
        Err(e @ ApiError::NotFound { .. }) => return Err(e.into()),
        Err(e) => {
            // Background-mutation failure: keep the last-good cart. The
            // query already queued the one notification for this failure.
            tracing::warn!(error = %e, "Product fetch for add-to-cart failed");
            return Ok(Json(CartMutationResponse {
                ok: false,
                cart: CartView::from(&cart),
            }));
        }
    };

    let title = product.title.clone();
    mediate(
        &state,
        &session,
        cart,
        CartAction::AddItem { product, quantity },
        &format!("Added {title} to your cart."),
    )
    .await
}

/// Set a line's quantity.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<UpdateCartForm>,
) -> Result<Json<CartMutationResponse>> {
    let product_id = ProductId::new(form.product_id);
    if !product_id.is_valid() {
        return Err(AppError::BadRequest(
            "product id must be a positive integer".to_string(),
        ));
    }

    let cart = load_cart(&session).await?;
    mediate(
        &state,
        &session,
        cart,
        CartAction::SetQuantity {
            product_id,
            quantity: form.quantity,
        },
        "Cart updated.",
    )
    .await
}

/// Remove a whole line. Removing an absent line is a no-op.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RemoveFromCartForm>,
) -> Result<Json<CartMutationResponse>> {
    let product_id = ProductId::new(form.product_id);
    if !product_id.is_valid() {
        return Err(AppError::BadRequest(
            "product id must be a positive integer".to_string(),
        ));
    }

    let cart = load_cart(&session).await?;
    mediate(
        &state,
        &session,
        cart,
        CartAction::RemoveItem { product_id },
        "Removed from your cart.",
    )
    .await
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CartMutationResponse>> {
    let cart = load_cart(&session).await?;
    mediate(&state, &session, cart, CartAction::Clear, "Cart cleared.").await
}

/// Item count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<serde_json::Value>> {
    let cart = load_cart(&session).await?;
    Ok(Json(json!({ "count": cart.item_count() })))
}

/// Checkout placeholder.
///
/// The route exists so the storefront's navigation has somewhere to point;
/// the flow itself is not built.
#[instrument]
pub async fn checkout() -> Response {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({
            "status": "not_implemented",
            "message": "Checkout is not available yet.",
        })),
    )
        .into_response()
}
