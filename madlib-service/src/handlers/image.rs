use axum::{body::Bytes, extract::State, Json};

use crate::{
    dtos::{ImagePromptRequest, ImageResponse},
    error::ApiError,
    AppState,
};

/// `POST /image`: raw text prompt in, `{"b64_json": ...}` out.
pub async fn create_image(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImageResponse>, ApiError> {
    state.require_credential()?;

    let request = ImagePromptRequest::from_body(&body)?;
    tracing::debug!(prompt_len = request.prompt.len(), "Generating image");

    let b64_json = state.generation.generate_image(&request).await?;

    Ok(Json(ImageResponse {
        b64_json: Some(b64_json),
    }))
}
