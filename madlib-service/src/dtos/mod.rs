//! Request bodies accepted by the routes and the JSON they answer with.
//!
//! Each route owns its body shape: `/madlib` takes JSON, `/image` takes raw text.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::ApiError;

/// Words for a Madlib story, kept as the caller sent them.
///
/// Any truthy JSON value is accepted, so `[]` or a bare string pass through and
/// are embedded in the prompt verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct MadlibRequest {
    words: Value,
}

impl MadlibRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let words: Value = serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(error = %e, "Madlib body is not valid JSON");
            ApiError::InvalidWords
        })?;

        if !is_truthy(&words) {
            return Err(ApiError::InvalidWords);
        }

        Ok(Self { words })
    }

    pub fn words(&self) -> &Value {
        &self.words
    }

    /// Compact JSON rendering used inside the story prompt.
    pub fn words_json(&self) -> String {
        self.words.to_string()
    }
}

/// `null`, `false`, zero and the empty string are falsy; everything else is truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Raw text prompt for image generation.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ImagePromptRequest {
    #[validate(length(min = 1))]
    pub prompt: String,
}

impl ImagePromptRequest {
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let request = Self {
            prompt: String::from_utf8_lossy(body).into_owned(),
        };
        request.validate().map_err(|_| ApiError::MissingPrompt)?;
        Ok(request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResponse {
    pub b64_json: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn word_list_is_accepted() {
        let request = MadlibRequest::from_body(br#"["cat","banana","spaceship"]"#).unwrap();

        assert_eq!(request.words(), &json!(["cat", "banana", "spaceship"]));
        assert_eq!(request.words_json(), r#"["cat","banana","spaceship"]"#);
    }

    #[test]
    fn empty_or_null_body_is_rejected() {
        for body in [&b""[..], b"   ", b"null"] {
            assert_eq!(
                MadlibRequest::from_body(body),
                Err(ApiError::InvalidWords),
                "body {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert_eq!(
            MadlibRequest::from_body(b"[\"cat\","),
            Err(ApiError::InvalidWords)
        );
    }

    #[test]
    fn falsy_scalars_are_rejected() {
        for body in [&b"false"[..], b"0", b"0.0", br#""""#] {
            assert_eq!(MadlibRequest::from_body(body), Err(ApiError::InvalidWords));
        }
    }

    #[test]
    fn empty_array_and_non_arrays_still_pass() {
        assert_eq!(
            MadlibRequest::from_body(b"[]").unwrap().words(),
            &json!([])
        );
        assert_eq!(
            MadlibRequest::from_body(br#"{"noun":"cat"}"#).unwrap().words(),
            &json!({"noun": "cat"})
        );
        assert_eq!(
            MadlibRequest::from_body(br#""cat""#).unwrap().words(),
            &json!("cat")
        );
        assert!(MadlibRequest::from_body(b"true").is_ok());
        assert!(MadlibRequest::from_body(b"7").is_ok());
    }

    #[test]
    fn prompt_is_taken_verbatim() {
        let request = ImagePromptRequest::from_body(b"  a red bicycle on the moon ").unwrap();

        assert_eq!(request.prompt, "  a red bicycle on the moon ");
    }

    #[test]
    fn empty_prompt_is_rejected() {
        assert_eq!(
            ImagePromptRequest::from_body(b""),
            Err(ApiError::MissingPrompt)
        );
    }

    #[test]
    fn whitespace_prompt_passes() {
        assert!(ImagePromptRequest::from_body(b" ").is_ok());
    }

    #[test]
    fn image_response_serializes_missing_payload_as_null() {
        let json = serde_json::to_string(&ImageResponse { b64_json: None }).unwrap();
        assert_eq!(json, r#"{"b64_json":null}"#);
    }
}
