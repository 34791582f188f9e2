//! HTTP surface: route table, cross-origin policy, and shared helpers.

pub mod cakes;
pub mod orders;
pub mod owner;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use axum::routing::{delete, get, patch, post};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a path segment as a UUID, mapping failure to a 400.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid id format: '{raw}'")))
}

/// Build the full application router.
///
/// Uploaded images are served back as static files under `/uploads`, from
/// the same directory the create-cake handler writes to. The body limit is
/// lifted on `/api/cakes` only, so image uploads of any size go through
/// while the JSON endpoints keep the default cap.
pub fn app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);
    let serve_images = ServeDir::new(state.images.dir());

    Router::new()
        .route(
            "/api/cakes",
            get(cakes::list_cakes)
                .post(cakes::create_cake)
                .layer(DefaultBodyLimit::disable()),
        )
        .route("/api/cakes/{id}", delete(cakes::delete_cake))
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::place_order),
        )
        .route("/api/orders/{id}/confirm", patch(orders::confirm_delivery))
        .route("/api/owner/login", post(owner::login))
        .nest_service("/uploads", serve_images)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Cross-origin policy: explicit origin list with credentials allowed.
///
/// Origins that fail header encoding are skipped with a warning rather than
/// taking the server down.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Skipping malformed CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
