//! In-memory implementation of the stores for testing and development

use crate::models::{Cake, Order, OrderStatus};
use crate::storage::{CakeStore, OrderStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory cake store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryCakeStore {
    cakes: Arc<RwLock<HashMap<Uuid, Cake>>>,
}

impl InMemoryCakeStore {
    /// Create a new in-memory cake store
    pub fn new() -> Self {
        Self {
            cakes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCakeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CakeStore for InMemoryCakeStore {
    async fn create(&self, cake: Cake) -> Result<Cake> {
        let mut cakes = self
            .cakes
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        cakes.insert(cake.id, cake.clone());

        Ok(cake)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Cake>> {
        let cakes = self
            .cakes
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(cakes.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Cake>> {
        let cakes = self
            .cakes
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(cakes.values().cloned().collect())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut cakes = self
            .cakes
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(cakes.remove(id).is_some())
    }
}

/// In-memory order store
#[derive(Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl InMemoryOrderStore {
    /// Create a new in-memory order store
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: Order) -> Result<Order> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(orders.values().cloned().collect())
    }

    async fn update_status(&self, id: &Uuid, status: OrderStatus) -> Result<Option<Order>> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(orders.get_mut(id).map(|order| {
            order.status = status;
            order.clone()
        }))
    }
}
