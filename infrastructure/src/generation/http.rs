//! HTTP adapter for OpenAI-compatible chat completion APIs.
//!
//! Structured calls request JSON mode and decode the first choice; status
//! codes and transport failures are mapped onto [`GenerationError`].

use super::protocol::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
    extract_json_object,
};
use crate::config::FileGenerationConfig;
use async_trait::async_trait;
use buildcrew_application::{GenerationError, GenerationService};
use buildcrew_domain::ResponseShape;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors while setting up the HTTP adapter
#[derive(Error, Debug)]
pub enum HttpGenerationError {
    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Generation Service backed by a chat completions endpoint
pub struct HttpGenerationService {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl HttpGenerationService {
    pub fn new(
        endpoint: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, HttpGenerationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: format!("{}/chat/completions", endpoint.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.7,
        })
    }

    /// Build from the `[generation]` config section, reading the key from
    /// the configured environment variable
    pub fn from_config(config: &FileGenerationConfig) -> Result<Self, HttpGenerationError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| HttpGenerationError::MissingApiKey(config.api_key_env.clone()))?;
        Ok(Self::new(
            &config.endpoint,
            api_key,
            config.model.clone(),
            Duration::from_secs(config.timeout_seconds),
        )?
        .with_temperature(config.temperature))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        prompt: &str,
        response_format: Option<ResponseFormat>,
    ) -> Result<String, GenerationError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.temperature,
            response_format,
        };

        debug!("POST {} (model {})", self.url, self.model);
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, &body));
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else {
                GenerationError::MalformedResponse(format!("invalid completion body: {}", e))
            }
        })?;

        body.into_content().ok_or_else(|| {
            GenerationError::MalformedResponse("completion has no content".to_string())
        })
    }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    async fn generate_structured(
        &self,
        prompt: &str,
        shape: &ResponseShape,
    ) -> Result<Value, GenerationError> {
        let text = self
            .complete(prompt, Some(ResponseFormat::json_object()))
            .await?;

        let json = extract_json_object(&text).ok_or_else(|| {
            warn!("'{}' answer contains no JSON object", shape.name);
            GenerationError::MalformedResponse(format!("no JSON object in '{}' answer", shape.name))
        })?;

        serde_json::from_str(json).map_err(|e| {
            GenerationError::MalformedResponse(format!("'{}' answer is not valid JSON: {}", shape.name, e))
        })
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        self.complete(prompt, None).await
    }
}

fn map_transport_error(error: reqwest::Error) -> GenerationError {
    if error.is_timeout() {
        GenerationError::Timeout
    } else if error.is_connect() || error.is_request() {
        GenerationError::ConnectionError(error.to_string())
    } else {
        GenerationError::RequestFailed(error.to_string())
    }
}

fn map_status(status: StatusCode, body: &str) -> GenerationError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            GenerationError::AuthenticationFailed(detail)
        }
        StatusCode::TOO_MANY_REQUESTS => GenerationError::QuotaExceeded(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GenerationError::Timeout,
        _ => GenerationError::RequestFailed(format!("HTTP {}: {}", status.as_u16(), detail)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_endpoint() {
        let service = HttpGenerationService::new(
            "http://localhost:8080/v1/",
            "key",
            "local",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(service.url, "http://localhost:8080/v1/chat/completions");
        assert_eq!(service.model(), "local");
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"error": {"message": "bad key"}}"#;
        assert_eq!(
            map_status(StatusCode::UNAUTHORIZED, body),
            GenerationError::AuthenticationFailed("bad key".to_string())
        );
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, ""),
            GenerationError::AuthenticationFailed(_)
        ));
        assert_eq!(
            map_status(StatusCode::TOO_MANY_REQUESTS, ""),
            GenerationError::QuotaExceeded("HTTP 429".to_string())
        );
        assert_eq!(map_status(StatusCode::GATEWAY_TIMEOUT, ""), GenerationError::Timeout);
        assert!(matches!(
            map_status(StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            GenerationError::RequestFailed(_)
        ));
    }

    #[test]
    fn test_from_config_requires_api_key() {
        let config = FileGenerationConfig {
            api_key_env: "BUILDCREW_TEST_UNSET_API_KEY".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            HttpGenerationService::from_config(&config),
            Err(HttpGenerationError::MissingApiKey(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_connection_error() {
        // Port 9 (discard) on localhost is closed in any sane test environment
        let service = HttpGenerationService::new(
            "http://127.0.0.1:9",
            "key",
            "local",
            Duration::from_secs(2),
        )
        .unwrap();
        let err = service.generate_text("hi").await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::ConnectionError(_) | GenerationError::Timeout
        ));
    }
}
