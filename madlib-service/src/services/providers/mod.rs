//! Upstream AI provider abstractions and implementations.
//!
//! Handlers talk to the traits only, so the OpenAI clients can be swapped for
//! the mocks in tests.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Parameters for a chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Parameters for an image generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageParams {
    pub model: String,
    pub count: u32,
    pub size: String,
}

/// Text generation backend (e.g. OpenAI chat completions).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send `prompt` as a single system message and return the first choice's text.
    ///
    /// `Ok(None)` means the call succeeded but produced no text.
    async fn complete(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> Result<Option<String>, ProviderError>;
}

/// Image generation backend returning base64 encoded images.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate images for `prompt` and return the first one's base64 payload.
    ///
    /// `Ok(None)` means the first image carried no payload.
    async fn generate(
        &self,
        prompt: &str,
        params: &ImageParams,
    ) -> Result<Option<String>, ProviderError>;
}
