//! Storage backends for cakes and orders
//!
//! Handlers only see the two traits below; the backing store is chosen at
//! startup (in-memory by default, MongoDB behind the `mongodb_backend`
//! feature).

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Cake, Order, OrderStatus};

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::{InMemoryCakeStore, InMemoryOrderStore};
#[cfg(feature = "mongodb_backend")]
pub use mongodb::{MongoCakeStore, MongoOrderStore};

/// Storage for the cake catalog
#[async_trait]
pub trait CakeStore: Send + Sync {
    /// Persist a new cake
    async fn create(&self, cake: Cake) -> Result<Cake>;

    /// Get a cake by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Cake>>;

    /// List all cakes
    async fn list(&self) -> Result<Vec<Cake>>;

    /// Delete a cake by ID
    ///
    /// Returns `true` when a record was removed, `false` when none existed.
    async fn delete(&self, id: &Uuid) -> Result<bool>;
}

/// Storage for customer orders
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order
    async fn create(&self, order: Order) -> Result<Order>;

    /// List all orders
    async fn list(&self) -> Result<Vec<Order>>;

    /// Set the status of an order and return the updated record
    ///
    /// Returns `None` when no order with that ID exists.
    async fn update_status(&self, id: &Uuid, status: OrderStatus) -> Result<Option<Order>>;
}
