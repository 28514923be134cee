use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Environment variable holding the upstream credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_STORY_MODEL: &str = "gpt-4.1-nano";
const DEFAULT_IMAGE_MODEL: &str = "dall-e-2";

#[derive(Debug, Clone)]
pub struct MadlibConfig {
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Absent credentials are tolerated at startup and reported per request.
    pub api_key: Option<Secret<String>>,
    /// Gateway base URL, without a trailing slash.
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Chat model used for Madlib stories.
    pub story_model: String,
    /// Image model used for prompt rendering.
    pub image_model: String,
}

impl MadlibConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Ok(Self::from_lookup(common, |key| env::var(key).ok()))
    }

    /// Build the service settings from an arbitrary key lookup.
    pub fn from_lookup(
        common: core_config::Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        MadlibConfig {
            common,
            openai: OpenAiConfig {
                api_key: lookup(API_KEY_VAR).map(Secret::new),
                base_url: get("OPENAI_BASE_URL", DEFAULT_BASE_URL)
                    .trim_end_matches('/')
                    .to_string(),
            },
            models: ModelConfig {
                story_model: get("MADLIB_STORY_MODEL", DEFAULT_STORY_MODEL),
                image_model: get("MADLIB_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            },
        }
    }
}

impl OpenAiConfig {
    pub fn new(api_key: Option<&str>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The credential, or `None` when it is unset or empty.
    pub fn credential(&self) -> Option<&Secret<String>> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            story_model: DEFAULT_STORY_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}
