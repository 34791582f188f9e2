//! Domain models for the storefront
//!
//! Cakes are the catalog items managed by the owner; orders reference a cake
//! by id and carry delivery details entered by the customer.

pub mod cake;
pub mod order;

pub use cake::{Cake, CakeInput};
pub use order::{Order, OrderStatus, PlaceOrder, ResolvedOrder};
