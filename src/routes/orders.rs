//! Order handlers
//!
//! Orders are placed by customers against a cake id and confirmed as
//! delivered by the owner. Listings resolve each order's cake reference to
//! the full record so the storefront needs no follow-up requests.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{Order, OrderStatus, PlaceOrder, ResolvedOrder};
use crate::routes::parse_id;
use crate::state::AppState;

/// List all orders with their cake references resolved
///
/// GET /api/orders
///
/// An order whose cake has since been deleted still appears, with `cakeId`
/// resolved to `null`.
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResolvedOrder>>, ApiError> {
    let orders = state
        .orders
        .list()
        .await
        .map_err(|e| ApiError::internal("Error fetching orders", e))?;

    let mut resolved = Vec::with_capacity(orders.len());
    for order in orders {
        let cake = state
            .cakes
            .get(&order.cake_id)
            .await
            .map_err(|e| ApiError::internal("Error fetching orders", e))?;
        resolved.push(order.resolve(cake));
    }

    Ok(Json(resolved))
}

/// Place a new order
///
/// POST /api/orders
///
/// The body is deserialized by hand so a rejected payload (unknown keys,
/// malformed cake id, wrong types) comes back as a 400 with the reason.
pub async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input: PlaceOrder = serde_json::from_value(payload)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order payload: {e}")))?;
    input
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let order = Order::new(input);
    state
        .orders
        .create(order)
        .await
        .map_err(|e| ApiError::internal("Error placing order", e))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Order placed" })),
    ))
}

/// Confirm an order as delivered
///
/// PATCH /api/orders/{id}/confirm
///
/// Idempotent: confirming an already-delivered order succeeds and returns
/// the same record. The response embeds the updated order with its raw
/// `cakeId`, unresolved. An id that matches no order is not an error: the
/// response is still a success, with `"order": null`.
pub async fn confirm_delivery(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;

    let updated = state
        .orders
        .update_status(&id, OrderStatus::Delivered)
        .await
        .map_err(|e| ApiError::internal("Failed to confirm order", e))?;

    Ok(Json(json!({ "message": "Order confirmed", "order": updated })))
}
