//! HTTP handlers for the madlib service.

pub mod image;
pub mod madlib;

pub use image::create_image;
pub use madlib::create_madlib;

use crate::error::ApiError;

/// Connectivity check.
pub async fn index() -> &'static str {
    "Hello!"
}

/// Catch-all for unknown paths and unsupported methods.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
