//! Shared helpers for the API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use tempfile::TempDir;
use uuid::Uuid;

use cakeshop::config::AppConfig;
use cakeshop::models::{Cake, Order, OrderStatus};
use cakeshop::routes::app_router;
use cakeshop::state::AppState;
use cakeshop::storage::{CakeStore, InMemoryCakeStore, InMemoryOrderStore, OrderStore};
use cakeshop::uploads::ImageStore;

/// A full in-memory server plus direct handles to everything behind it, so
/// tests can assert on stored state and on files in the upload directory.
pub struct TestContext {
    pub server: TestServer,
    pub cakes: InMemoryCakeStore,
    pub orders: InMemoryOrderStore,
    pub upload_dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_owner_hash(None)
    }

    pub fn with_owner_hash(owner_password_hash: Option<String>) -> Self {
        let upload_dir = tempfile::tempdir().unwrap();
        let cakes = InMemoryCakeStore::new();
        let orders = InMemoryOrderStore::new();

        let server = build_server(
            Arc::new(cakes.clone()),
            Arc::new(orders.clone()),
            &upload_dir,
            owner_password_hash,
        );

        Self {
            server,
            cakes,
            orders,
            upload_dir,
        }
    }
}

/// Spin up a test server over explicit store implementations.
///
/// Uploads are written to (and served back from) `upload_dir`, which the
/// caller keeps alive for the duration of the test.
pub fn build_server(
    cakes: Arc<dyn CakeStore>,
    orders: Arc<dyn OrderStore>,
    upload_dir: &TempDir,
    owner_password_hash: Option<String>,
) -> TestServer {
    let config = AppConfig {
        port: 0,
        mongo_uri: "mongodb://localhost:27017".to_string(),
        mongo_db: "cakeshop_test".to_string(),
        upload_dir: upload_dir.path().to_string_lossy().into_owned(),
        allowed_origins: vec!["http://localhost:5173".to_string()],
        owner_password_hash,
    };

    let state = AppState {
        cakes,
        orders,
        images: ImageStore::new(upload_dir.path()),
        config: Arc::new(config),
    };

    TestServer::new(app_router(state))
}

/// Assemble a cake creation form with all four fields populated.
pub fn cake_form(
    name: &str,
    price: &str,
    description: &str,
    file_name: &str,
    bytes: &[u8],
) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", name)
        .add_text("price", price)
        .add_text("description", description)
        .add_part(
            "image",
            Part::bytes(bytes.to_vec())
                .file_name(file_name)
                .mime_type("image/png"),
        )
}

/// Cake store whose every operation fails, for exercising the 500 paths.
pub struct FailingCakeStore;

#[async_trait]
impl CakeStore for FailingCakeStore {
    async fn create(&self, _cake: Cake) -> Result<Cake> {
        Err(anyhow!("simulated storage failure"))
    }

    async fn get(&self, _id: &Uuid) -> Result<Option<Cake>> {
        Err(anyhow!("simulated storage failure"))
    }

    async fn list(&self) -> Result<Vec<Cake>> {
        Err(anyhow!("simulated storage failure"))
    }

    async fn delete(&self, _id: &Uuid) -> Result<bool> {
        Err(anyhow!("simulated storage failure"))
    }
}

/// Order store whose every operation fails.
pub struct FailingOrderStore;

#[async_trait]
impl OrderStore for FailingOrderStore {
    async fn create(&self, _order: Order) -> Result<Order> {
        Err(anyhow!("simulated storage failure"))
    }

    async fn list(&self) -> Result<Vec<Order>> {
        Err(anyhow!("simulated storage failure"))
    }

    async fn update_status(&self, _id: &Uuid, _status: OrderStatus) -> Result<Option<Order>> {
        Err(anyhow!("simulated storage failure"))
    }
}
