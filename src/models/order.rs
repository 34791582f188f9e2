//! Order entity and delivery lifecycle

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Cake;

/// Delivery state of an order. Orders start `Pending` and move to
/// `Delivered` exactly once, via the owner's confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

/// A customer order as stored. `cake_id` is a weak reference: the cake may
/// be deleted afterwards and the order survives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub contact: String,
    pub address: String,
    pub cake_id: Uuid,
    pub status: OrderStatus,
}

impl Order {
    /// Build a new order from a validated request. The id and the `Pending`
    /// status are assigned here, never taken from the client.
    pub fn new(input: PlaceOrder) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_name: input.customer_name,
            contact: input.contact,
            address: input.address,
            cake_id: input.cake_id,
            status: OrderStatus::default(),
        }
    }

    /// Replace the raw cake id with the full cake record for listings.
    /// A dangling reference resolves to `None` (serialized as `null`).
    pub fn resolve(self, cake: Option<Cake>) -> ResolvedOrder {
        ResolvedOrder {
            id: self.id,
            customer_name: self.customer_name,
            contact: self.contact,
            address: self.address,
            cake_id: cake,
            status: self.status,
        }
    }
}

/// Listing view of an order: same shape as [`Order`] but with the referenced
/// cake embedded under the `cakeId` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOrder {
    pub id: Uuid,
    pub customer_name: String,
    pub contact: String,
    pub address: String,
    pub cake_id: Option<Cake>,
    pub status: OrderStatus,
}

/// Payload accepted when placing an order. Unknown keys are rejected, so a
/// client cannot smuggle in `status` or `id`.
#[derive(Debug, Clone, Validate, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlaceOrder {
    #[validate(length(min = 1, message = "Customer name must not be empty"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "Contact must not be empty"))]
    pub contact: String,
    #[validate(length(min = 1, message = "Address must not be empty"))]
    pub address: String,
    pub cake_id: Uuid,
}
