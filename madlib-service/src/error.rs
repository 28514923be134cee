//! Request-level failures and their HTTP representation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::dtos::ImageResponse;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Missing OPENAI_API_KEY")]
    MissingCredential,

    #[error("Missing or invalid words")]
    InvalidWords,

    #[error("Missing prompt")]
    MissingPrompt,

    #[error("No story generated.")]
    NoStory,

    /// The upstream answered without an image; carries whatever it sent instead.
    #[error("No image generated.")]
    NoImage(Option<String>),

    #[error("Something went wrong generating your madlib.")]
    StoryFailed,

    #[error("Something went wrong generating your image.")]
    ImageFailed,

    #[error("404 - Not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidWords | ApiError::MissingPrompt => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MissingCredential
            | ApiError::NoStory
            | ApiError::NoImage(_)
            | ApiError::StoryFailed
            | ApiError::ImageFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // Same JSON shape as a successful image, only the status differs.
            ApiError::NoImage(b64_json) => (status, Json(ImageResponse { b64_json })).into_response(),
            other => (status, other.to_string()).into_response(),
        }
    }
}
