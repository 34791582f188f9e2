//! Cake catalog handlers
//!
//! Listing and deletion are plain JSON endpoints; creation accepts a
//! `multipart/form-data` upload carrying the text fields plus the image
//! file, which is written to disk before the record is stored.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{Cake, CakeInput};
use crate::routes::parse_id;
use crate::state::AppState;

/// List all cakes
///
/// GET /api/cakes
pub async fn list_cakes(State(state): State<AppState>) -> Result<Json<Vec<Cake>>, ApiError> {
    let cakes = state
        .cakes
        .list()
        .await
        .map_err(|e| ApiError::internal("Error fetching cakes", e))?;

    Ok(Json(cakes))
}

/// Failures while reading the cake creation form. All of them are the
/// client's fault and map to a 400.
#[derive(Debug, Error)]
enum CakeFormError {
    #[error("Invalid multipart content")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Missing multipart field name, cannot process request")]
    MissingFieldName,

    #[error("Unrecognized multipart field '{field_name}'")]
    UnrecognizedField { field_name: String },

    #[error("Missing multipart field '{field_name}'")]
    MissingField { field_name: &'static str },

    #[error("Could not read multipart field '{field_name}' as text: {source}")]
    InvalidText {
        field_name: &'static str,
        source: axum::extract::multipart::MultipartError,
    },

    #[error("Invalid price '{value}'")]
    InvalidPrice { value: String },

    #[error("Missing multipart field 'image'")]
    MissingImage,

    #[error("Invalid bytes in multipart field 'image': {source}")]
    InvalidImage {
        source: axum::extract::multipart::MultipartError,
    },
}

impl From<CakeFormError> for ApiError {
    fn from(err: CakeFormError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// The uploaded image part: client-provided filename plus raw bytes.
struct UploadedImage {
    file_name: String,
    data: Vec<u8>,
}

/// Read the cake creation form field by field. Exactly the four known
/// fields are accepted; anything else fails the whole request.
async fn parse_cake_form(
    mut form: Multipart,
) -> Result<(CakeInput, UploadedImage), CakeFormError> {
    let mut name = None;
    let mut price = None;
    let mut description = None;
    let mut image = None;

    while let Some(field) = form.next_field().await? {
        let field_name = field
            .name()
            .ok_or(CakeFormError::MissingFieldName)?
            .to_owned();

        match field_name.as_str() {
            "name" => {
                name = Some(field.text().await.map_err(|source| {
                    CakeFormError::InvalidText {
                        field_name: "name",
                        source,
                    }
                })?);
            }
            "price" => {
                let raw = field.text().await.map_err(|source| {
                    CakeFormError::InvalidText {
                        field_name: "price",
                        source,
                    }
                })?;
                // f64::from_str accepts "inf" and "NaN"; neither is a price
                let value: f64 = raw
                    .parse()
                    .ok()
                    .filter(|price: &f64| price.is_finite())
                    .ok_or(CakeFormError::InvalidPrice { value: raw })?;
                price = Some(value);
            }
            "description" => {
                description = Some(field.text().await.map_err(|source| {
                    CakeFormError::InvalidText {
                        field_name: "description",
                        source,
                    }
                })?);
            }
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let data = field
                    .bytes()
                    .await
                    .map_err(|source| CakeFormError::InvalidImage { source })?
                    .to_vec();
                image = Some(UploadedImage { file_name, data });
            }
            _ => {
                return Err(CakeFormError::UnrecognizedField { field_name });
            }
        }
    }

    let input = CakeInput {
        name: name.ok_or(CakeFormError::MissingField { field_name: "name" })?,
        price: price.ok_or(CakeFormError::MissingField {
            field_name: "price",
        })?,
        description: description.ok_or(CakeFormError::MissingField {
            field_name: "description",
        })?,
    };
    let image = image.ok_or(CakeFormError::MissingImage)?;

    Ok((input, image))
}

/// Create a cake from a multipart form upload
///
/// POST /api/cakes
///
/// The image is written to disk first; if the record cannot be stored
/// afterwards, the file is removed again so no orphan is left behind by a
/// failed create.
pub async fn create_cake(
    State(state): State<AppState>,
    form: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (input, image) = parse_cake_form(form).await?;
    input
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let filename = state
        .images
        .save(&image.file_name, &image.data)
        .await
        .map_err(|e| ApiError::internal("Error uploading cake", e))?;

    let cake = Cake::new(input, state.images.public_path(&filename));
    if let Err(e) = state.cakes.create(cake).await {
        state.images.remove(&filename).await;
        return Err(ApiError::internal("Error uploading cake", e));
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Cake added successfully" })),
    ))
}

/// Delete a cake by id
///
/// DELETE /api/cakes/{id}
///
/// The stored image file is left in place; only the record goes away.
pub async fn delete_cake(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;

    let removed = state
        .cakes
        .delete(&id)
        .await
        .map_err(|e| ApiError::internal("Server error", e))?;

    if !removed {
        return Err(ApiError::NotFound("Cake not found"));
    }

    Ok(Json(json!({ "message": "Cake deleted successfully" })))
}
