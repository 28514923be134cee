use axum::{body::Bytes, extract::State};

use crate::{dtos::MadlibRequest, error::ApiError, AppState};

/// `POST /madlib`: JSON list of words in, plain text story out.
pub async fn create_madlib(State(state): State<AppState>, body: Bytes) -> Result<String, ApiError> {
    state.require_credential()?;

    let request = MadlibRequest::from_body(&body)?;
    tracing::debug!(words = %request.words(), "Generating madlib");

    state.generation.generate_story(&request).await
}
