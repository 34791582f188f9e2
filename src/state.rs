//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::{CakeStore, OrderStore};
use crate::uploads::ImageStore;

/// State cloned into every handler.
///
/// The stores are injected at startup and handlers hold nothing else between
/// requests; all persistent state lives behind the store trait objects.
#[derive(Clone)]
pub struct AppState {
    pub cakes: Arc<dyn CakeStore>,
    pub orders: Arc<dyn OrderStore>,
    pub images: ImageStore,
    pub config: Arc<AppConfig>,
}
