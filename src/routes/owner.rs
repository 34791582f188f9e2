//! Owner login handler
//!
//! There are no sessions or tokens: the storefront admin page sends the
//! password once and gets a yes/no. The password is only ever compared
//! against the bcrypt hash from `OWNER_PASSWORD_HASH`; no plaintext secret
//! lives in the configuration.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoginRequest {
    password: String,
}

/// Check the owner password
///
/// POST /api/owner/login
///
/// An unset `OWNER_PASSWORD_HASH` behaves exactly like a wrong password, so
/// a misconfigured deployment fails closed.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let request: LoginRequest = serde_json::from_value(payload)
        .map_err(|e| ApiError::BadRequest(format!("Invalid login payload: {e}")))?;

    let Some(hash) = state.config.owner_password_hash.clone() else {
        warn!("OWNER_PASSWORD_HASH not configured, rejecting owner login");
        return Err(ApiError::Unauthorized("Invalid password"));
    };

    // bcrypt is deliberately slow; keep it off the async workers.
    let password = request.password;
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &hash))
        .await
        .map_err(|e| ApiError::internal("Login failed", e.into()))?
        .map_err(|e| ApiError::internal("Login failed", e.into()))?;

    if !valid {
        return Err(ApiError::Unauthorized("Invalid password"));
    }

    Ok(Json(json!({ "message": "Login successful" })))
}
