//! Story and image generation on top of the providers.
//!
//! Sampling parameters are fixed; only the model names come from configuration.

use std::sync::Arc;

use crate::config::ModelConfig;
use crate::dtos::{ImagePromptRequest, MadlibRequest};
use crate::error::ApiError;
use crate::services::providers::{CompletionParams, ImageParams, ImageProvider, TextProvider};

pub const STORY_TEMPERATURE: f32 = 1.0;
pub const STORY_MAX_TOKENS: u32 = 100;
pub const IMAGE_COUNT: u32 = 1;
pub const IMAGE_SIZE: &str = "256x256";

/// Instruction sent to the chat model for a word list.
pub fn story_prompt(request: &MadlibRequest) -> String {
    format!(
        "Write a hilarious Madlib short story (50 words or less) using these words: {}",
        request.words_json()
    )
}

#[derive(Clone)]
pub struct GenerationService {
    text_provider: Arc<dyn TextProvider>,
    image_provider: Arc<dyn ImageProvider>,
    models: ModelConfig,
}

impl GenerationService {
    pub fn new(
        text_provider: Arc<dyn TextProvider>,
        image_provider: Arc<dyn ImageProvider>,
        models: ModelConfig,
    ) -> Self {
        Self {
            text_provider,
            image_provider,
            models,
        }
    }

    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams {
            model: self.models.story_model.clone(),
            temperature: STORY_TEMPERATURE,
            max_tokens: STORY_MAX_TOKENS,
        }
    }

    pub fn image_params(&self) -> ImageParams {
        ImageParams {
            model: self.models.image_model.clone(),
            count: IMAGE_COUNT,
            size: IMAGE_SIZE.to_string(),
        }
    }

    /// Generate a short story using the requested words. Single attempt.
    pub async fn generate_story(&self, request: &MadlibRequest) -> Result<String, ApiError> {
        let prompt = story_prompt(request);

        match self
            .text_provider
            .complete(&prompt, &self.completion_params())
            .await
        {
            Ok(Some(story)) if !story.is_empty() => Ok(story),
            Ok(_) => {
                tracing::warn!(model = %self.models.story_model, "Upstream returned no story");
                Err(ApiError::NoStory)
            }
            Err(e) => {
                tracing::error!(error = %e, model = %self.models.story_model, "OpenAI error");
                Err(ApiError::StoryFailed)
            }
        }
    }

    /// Generate one image for the prompt and return its base64 payload. Single attempt.
    pub async fn generate_image(&self, request: &ImagePromptRequest) -> Result<String, ApiError> {
        match self
            .image_provider
            .generate(&request.prompt, &self.image_params())
            .await
        {
            Ok(Some(b64_json)) if !b64_json.is_empty() => Ok(b64_json),
            Ok(other) => {
                tracing::warn!(model = %self.models.image_model, "Upstream returned no image");
                Err(ApiError::NoImage(other))
            }
            Err(e) => {
                tracing::error!(error = %e, model = %self.models.image_model, "OpenAI error");
                Err(ApiError::ImageFailed)
            }
        }
    }
}
