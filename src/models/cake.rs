//! Cake catalog entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A cake on offer, as stored and as served to clients.
///
/// `image_url` holds the public path of the uploaded photo (e.g.
/// `/uploads/1707654321000.png`), not the on-disk location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cake {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image_url: String,
}

impl Cake {
    /// Build a new cake from validated form input and the public URL of its
    /// stored image. The id is assigned here, never by the client.
    pub fn new(input: CakeInput, image_url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            price: input.price,
            description: input.description,
            image_url,
        }
    }
}

/// Text fields of the cake creation form, before the image is attached.
#[derive(Debug, Clone, Validate)]
pub struct CakeInput {
    #[validate(length(min = 1, message = "Cake name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Cake price must not be negative"))]
    pub price: f64,
    #[validate(length(min = 1, message = "Cake description must not be empty"))]
    pub description: String,
}
