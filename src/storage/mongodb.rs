//! MongoDB-backed stores, enabled by the `mongodb_backend` feature.
//!
//! `MongoCakeStore` and `MongoOrderStore` share one `mongodb::Database`
//! handle and each own a collection (`cakes`, `orders`):
//!
//! ```sh
//! cargo run --no-default-features --features mongodb_backend
//! ```
//!
//! # Serialization strategy
//!
//! Records go through their `serde_json::Value` wire form before becoming
//! BSON documents, so stored field names match what clients see (`imageUrl`,
//! `customerName`) and UUIDs land as plain strings. The `id` field swaps
//! with MongoDB's `_id` at the document boundary in both directions.

use crate::models::{Cake, Order, OrderStatus};
use crate::storage::{CakeStore, OrderStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Turn a JSON object into a BSON document, moving `id` to MongoDB's `_id`
/// slot on the way in.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let Bson::Document(mut doc) = bson else {
        return Err(anyhow!("Expected BSON document, got non-object"));
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Turn a stored document back into its JSON wire form, moving `_id` back to
/// the `id` key clients see.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// UUIDs are stored and queried as plain strings.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Serialize a record into a MongoDB document via its JSON wire form.
fn to_document<T: Serialize>(record: &T) -> Result<Document> {
    let json =
        serde_json::to_value(record).map_err(|e| anyhow!("Failed to serialize record: {}", e))?;
    json_to_document(json)
}

/// Deserialize a MongoDB document back into a record via its JSON wire form.
fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T> {
    let json = document_to_json(doc);
    serde_json::from_value(json)
        .map_err(|e| anyhow!("Failed to deserialize record from document: {}", e))
}

// ---------------------------------------------------------------------------
// MongoCakeStore
// ---------------------------------------------------------------------------

/// Cake catalog storage backed by the `cakes` collection.
#[derive(Clone, Debug)]
pub struct MongoCakeStore {
    database: Database,
}

impl MongoCakeStore {
    /// Create a new `MongoCakeStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection("cakes")
    }
}

#[async_trait]
impl CakeStore for MongoCakeStore {
    /// Insert a new cake into the collection.
    ///
    /// Inserts the document and reads it back to return the stored version.
    async fn create(&self, cake: Cake) -> Result<Cake> {
        let doc = to_document(&cake)?;
        let id_bson = uuid_bson(&cake.id);

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create cake: {}", e))?;

        let result = self
            .collection()
            .find_one(doc! { "_id": id_bson })
            .await
            .map_err(|e| anyhow!("Failed to read back created cake: {}", e))?
            .ok_or_else(|| anyhow!("Cake not found after insert"))?;

        from_document(result)
    }

    /// Fetch a cake by UUID.
    ///
    /// Returns `Ok(None)` if the cake does not exist.
    async fn get(&self, id: &Uuid) -> Result<Option<Cake>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get cake: {}", e))?;

        match doc {
            Some(d) => Ok(Some(from_document(d)?)),
            None => Ok(None),
        }
    }

    /// List all cakes.
    async fn list(&self) -> Result<Vec<Cake>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .await
            .map_err(|e| anyhow!("Failed to list cakes: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect cakes: {}", e))?;

        docs.into_iter().map(from_document).collect()
    }

    /// Delete a cake by UUID, reporting whether a document matched.
    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete cake: {}", e))?;

        Ok(result.deleted_count > 0)
    }
}

// ---------------------------------------------------------------------------
// MongoOrderStore
// ---------------------------------------------------------------------------

/// Order storage backed by the `orders` collection.
#[derive(Clone, Debug)]
pub struct MongoOrderStore {
    database: Database,
}

impl MongoOrderStore {
    /// Create a new `MongoOrderStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection("orders")
    }
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    /// Insert a new order into the collection.
    ///
    /// Inserts the document and reads it back to return the stored version.
    async fn create(&self, order: Order) -> Result<Order> {
        let doc = to_document(&order)?;
        let id_bson = uuid_bson(&order.id);

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create order: {}", e))?;

        let result = self
            .collection()
            .find_one(doc! { "_id": id_bson })
            .await
            .map_err(|e| anyhow!("Failed to read back created order: {}", e))?
            .ok_or_else(|| anyhow!("Order not found after insert"))?;

        from_document(result)
    }

    /// List all orders.
    async fn list(&self) -> Result<Vec<Order>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .await
            .map_err(|e| anyhow!("Failed to list orders: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect orders: {}", e))?;

        docs.into_iter().map(from_document).collect()
    }

    /// Atomically set the status of an order, returning the updated record.
    ///
    /// Returns `Ok(None)` when no order with that UUID exists.
    async fn update_status(&self, id: &Uuid, status: OrderStatus) -> Result<Option<Order>> {
        let updated = self
            .collection()
            .find_one_and_update(
                doc! { "_id": uuid_bson(id) },
                doc! { "$set": { "status": status.as_str() } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to update order status: {}", e))?;

        match updated {
            Some(d) => Ok(Some(from_document(d)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CakeInput, PlaceOrder};
    use serde_json::json;

    // -----------------------------------------------------------------------
    // json_to_document / document_to_json
    // -----------------------------------------------------------------------

    #[test]
    fn json_to_document_renames_id_to_underscore_id() {
        let id = Uuid::new_v4().to_string();
        let doc = json_to_document(json!({"id": id, "name": "Black Forest"})).unwrap();

        assert_eq!(doc.get_str("_id").unwrap(), id);
        assert!(!doc.contains_key("id"), "plain id key should be gone");
        assert_eq!(doc.get_str("name").unwrap(), "Black Forest");
    }

    #[test]
    fn json_to_document_non_object_returns_error() {
        let err = json_to_document(json!(42)).unwrap_err();
        assert!(
            err.to_string().contains("non-object"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn document_to_json_renames_underscore_id_to_id() {
        let json = document_to_json(doc! { "_id": "abc", "status": "Pending" });

        assert_eq!(json["id"], "abc");
        assert_eq!(json["status"], "Pending");
        assert!(json.get("_id").is_none(), "_id should not leak to the wire");
    }

    // -----------------------------------------------------------------------
    // Domain record mapping
    // -----------------------------------------------------------------------

    #[test]
    fn cake_document_keeps_wire_field_names() {
        let cake = Cake::new(
            CakeInput {
                name: "Black Forest".to_string(),
                price: 450.0,
                description: "Chocolate sponge with cherries".to_string(),
            },
            "/uploads/1.png".to_string(),
        );

        let doc = to_document(&cake).unwrap();
        assert_eq!(doc.get_str("_id").unwrap(), cake.id.to_string());
        assert_eq!(doc.get_str("imageUrl").unwrap(), "/uploads/1.png");
        assert!(!doc.contains_key("image_url"));

        let back: Cake = from_document(doc).unwrap();
        assert_eq!(back, cake);
    }

    #[test]
    fn order_document_stores_status_string() {
        let order = Order::new(PlaceOrder {
            customer_name: "Satya".to_string(),
            contact: "9999999999".to_string(),
            address: "12 Baker Street".to_string(),
            cake_id: Uuid::new_v4(),
        });

        let doc = to_document(&order).unwrap();
        assert_eq!(doc.get_str("status").unwrap(), "Pending");
        assert_eq!(doc.get_str("customerName").unwrap(), "Satya");
        assert_eq!(doc.get_str("cakeId").unwrap(), order.cake_id.to_string());

        let back: Order = from_document(doc).unwrap();
        assert_eq!(back, order);
    }

    // -----------------------------------------------------------------------
    // uuid_bson
    // -----------------------------------------------------------------------

    #[test]
    fn uuid_bson_returns_string() {
        let id = Uuid::new_v4();
        assert_eq!(uuid_bson(&id), Bson::String(id.to_string()));
    }
}
