use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_API_URL;

pub const BLOG_TYPES: &[&str] = &[
    "general", "tutorial", "how-to", "listicle", "opinion", "review", "news",
];

pub const TONES: &[&str] = &[
    "professional",
    "casual",
    "friendly",
    "formal",
    "humorous",
    "persuasive",
];

pub const AUDIENCES: &[&str] = &[
    "general",
    "beginners",
    "professionals",
    "students",
    "developers",
    "business",
];

pub const GENERIC_FAILURE: &str = "Failed to generate blog post";

/// Body of `POST /generate-blog`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    #[serde(rename = "type")]
    pub blog_type: String,
    pub word_count: u32,
    pub tone: String,
    pub audience: String,
}

/// Success body. Only `content` is required; the rest is informational.
#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GenerationResponse {
    pub content: String,
    #[serde(default)]
    pub word_count: Option<usize>,
    #[serde(default)]
    pub generation_time: Option<f64>,
    #[serde(default)]
    pub model_used: Option<String>,
}

/// Error body. FastAPI puts a string here for `HTTPException` and an
/// array of objects for request validation failures.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn message(&self) -> String {
        match &self.detail {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(serde_json::Value::String(_) | serde_json::Value::Null) | None => {
                GENERIC_FAILURE.to_string()
            }
            Some(other) => other.to_string(),
        }
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BackendHealth {
    pub status: String,
    #[serde(default)]
    pub ollama_status: String,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    Unknown,
    Online(BackendHealth),
    Offline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Seconds; unset means a request may wait forever.
    #[serde(default)]
    pub request_timeout: Option<u64>,
    #[serde(default)]
    pub defaults: FormDefaults,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: None,
            defaults: FormDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub blog_type: String,
    pub word_count: u32,
    pub tone: String,
    pub audience: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            blog_type: "general".to_string(),
            word_count: 500,
            tone: "professional".to_string(),
            audience: "general".to_string(),
        }
    }
}

/// Position of `value` in `options`, falling back to the first entry.
pub fn option_index(options: &[&str], value: &str) -> usize {
    options.iter().position(|o| *o == value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_type_field() {
        let request = GenerationRequest {
            topic: "rust".to_string(),
            blog_type: "tutorial".to_string(),
            word_count: 500,
            tone: "casual".to_string(),
            audience: "developers".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "topic": "rust",
                "type": "tutorial",
                "word_count": 500,
                "tone": "casual",
                "audience": "developers"
            })
        );
    }

    #[test]
    fn test_response_with_only_content() {
        let response: GenerationResponse =
            serde_json::from_str(r#"{"content":"one two three"}"#).unwrap();
        assert_eq!(response.content, "one two three");
        assert!(response.model_used.is_none());
    }

    #[test]
    fn test_response_with_backend_metrics() {
        let response: GenerationResponse = serde_json::from_str(
            r#"{"content":"hi","word_count":1,"generation_time":2.5,"model_used":"llama3.2:1b"}"#,
        )
        .unwrap();
        assert_eq!(response.word_count, Some(1));
        assert_eq!(response.model_used.as_deref(), Some("llama3.2:1b"));
    }

    #[test]
    fn test_error_body_string_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"bad topic"}"#).unwrap();
        assert_eq!(body.message(), "bad topic");
    }

    #[test]
    fn test_error_body_missing_detail() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message(), GENERIC_FAILURE);
        assert_eq!(ErrorBody::default().message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_error_body_empty_or_null_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":""}"#).unwrap();
        assert_eq!(body.message(), GENERIC_FAILURE);

        let body: ErrorBody = serde_json::from_str(r#"{"detail":null}"#).unwrap();
        assert_eq!(body.message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_error_body_validation_array() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["body","word_count"]}]}"#).unwrap();
        assert_eq!(body.message(), r#"[{"loc":["body","word_count"]}]"#);
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert!(config.request_timeout.is_none());
        assert_eq!(config.defaults.word_count, 500);
        assert_eq!(config.defaults.tone, "professional");
    }

    #[test]
    fn test_option_index_fallback() {
        assert_eq!(option_index(TONES, "casual"), 1);
        assert_eq!(option_index(TONES, "sarcastic"), 0);
    }
}
