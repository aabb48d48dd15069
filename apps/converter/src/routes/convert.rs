use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;
use crate::transfer::{transfer, TransferParams};

const BODY_FIELDS: [&str; 3] = ["source_bucket", "object_key", "dest_bucket"];

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub output_key: String,
}

/// POST /convert
pub async fn handle_convert(
    State(state): State<AppState>,
    payload: Result<Json<TransferParams>, JsonRejection>,
) -> Result<Json<ConvertResponse>, AppError> {
    let Json(params) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request = params.validate(BODY_FIELDS)?;

    let output_key = transfer(state.store.as_ref(), &state.page_config, &request).await?;

    Ok(Json(ConvertResponse {
        status: "success",
        message: "Conversion completed",
        output_key,
    }))
}
