//! OpenAI-compatible chat-completions gateway
//!
//! Implements [`LlmGateway`] over `POST {base_url}/chat/completions`. Works
//! with any endpoint speaking the same protocol (Azure-style proxies, local
//! servers) by changing `base_url`.

use super::types::{self, ChatRequest, ChatResponse};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};
use triage_application::ports::llm_gateway::{GatewayError, LlmGateway};
use triage_domain::util::truncate_str;
use triage_domain::{Conversation, LlmResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Stateless gateway; one instance serves every session.
pub struct OpenAiLlmGateway {
    http: reqwest::Client,
    base_url: String,
    model: String,
    temperature: Option<f32>,
}

impl OpenAiLlmGateway {
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|e| GatewayError::Other(format!("invalid API key: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            temperature: None,
        })
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

fn status_error(status: StatusCode, body: &str) -> GatewayError {
    let message = format!("status {}: {}", status.as_u16(), truncate_str(body.trim(), 500));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Unauthorized(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ => GatewayError::RequestFailed(message),
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for OpenAiLlmGateway {
    async fn complete(
        &self,
        conversation: &Conversation,
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse, GatewayError> {
        let request = ChatRequest {
            model: &self.model,
            messages: types::convert_conversation(conversation),
            tools: tools.iter().filter_map(types::convert_tool_schema).collect(),
            temperature: self.temperature,
        };

        debug!(
            model = %self.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Calling chat completions"
        );

        let response = self
            .http
            .post(self.completions_url())
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            let error = status_error(status, &body);
            warn!(model = %self.model, "Chat completions failed: {}", error);
            return Err(error);
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(format!("undecodable body: {}", e)))?;
        types::convert_response(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
