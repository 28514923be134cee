//! Mock provider implementations for testing.

use super::{CompletionParams, ImageParams, ImageProvider, ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// What a mock provider answers with.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Successful call returning this payload.
    Payload(Option<String>),
    /// Failed call, surfaced as an API error with this message.
    Failure(String),
}

impl MockOutcome {
    fn respond(&self) -> Result<Option<String>, ProviderError> {
        match self {
            MockOutcome::Payload(payload) => Ok(payload.clone()),
            MockOutcome::Failure(msg) => Err(ProviderError::ApiError(msg.clone())),
        }
    }
}

/// Mock text provider recording the prompts it receives.
pub struct MockTextProvider {
    outcome: MockOutcome,
    calls: Mutex<Vec<(String, CompletionParams)>>,
}

impl MockTextProvider {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn story(text: &str) -> Self {
        Self::new(MockOutcome::Payload(Some(text.to_string())))
    }

    pub fn empty() -> Self {
        Self::new(MockOutcome::Payload(None))
    }

    pub fn failing() -> Self {
        Self::new(MockOutcome::Failure("mock upstream failure".to_string()))
    }

    /// Prompts and parameters seen so far, in call order.
    pub fn calls(&self) -> Vec<(String, CompletionParams)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn complete(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> Result<Option<String>, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((prompt.to_string(), params.clone()));
        }
        self.outcome.respond()
    }
}

/// Mock image provider recording the prompts it receives.
pub struct MockImageProvider {
    outcome: MockOutcome,
    calls: Mutex<Vec<(String, ImageParams)>>,
}

impl MockImageProvider {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn image(b64_json: &str) -> Self {
        Self::new(MockOutcome::Payload(Some(b64_json.to_string())))
    }

    pub fn empty() -> Self {
        Self::new(MockOutcome::Payload(None))
    }

    pub fn failing() -> Self {
        Self::new(MockOutcome::Failure("mock upstream failure".to_string()))
    }

    pub fn calls(&self) -> Vec<(String, ImageParams)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &ImageParams,
    ) -> Result<Option<String>, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((prompt.to_string(), params.clone()));
        }
        self.outcome.respond()
    }
}
