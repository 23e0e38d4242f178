//! Backend client for the chat service's three HTTP endpoints.
//!
//! The [`Backend`] trait is the seam between conversation state and the
//! network: the event loop and the CLI talk to the trait, production code
//! uses [`HttpBackend`], and tests substitute an in-memory fake.

use async_trait::async_trait;

use crate::api::{ChatReply, ChatRequest, HealthReply, ModelEntry};
use crate::core::constants::HEALTHY_STATUS;
use crate::utils::url::construct_api_url;

pub type BackendResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Interface for reaching the remote chat service.
///
/// Implementors encapsulate transport and serialization details; consumers
/// stay decoupled from any particular HTTP client library.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Send one user message to the chat endpoint and return the reply text.
    async fn send_chat(&self, message: &str) -> BackendResult<String>;

    /// Fetch the full model catalog. The result replaces any cached set.
    async fn fetch_models(&self) -> BackendResult<Vec<ModelEntry>>;

    /// Probe the health endpoint. Any failure (transport error, non-2xx
    /// status, malformed body) reads as unhealthy rather than an error.
    async fn check_health(&self) -> bool;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send_chat(&self, message: &str) -> BackendResult<String> {
        let chat_url = construct_api_url(&self.base_url, "api/chat");
        let request = ChatRequest {
            message: message.to_string(),
        };

        let response = self
            .client
            .post(chat_url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(format!("chat request failed with status {status}: {error_text}").into());
        }

        let reply = response.json::<ChatReply>().await?;
        Ok(reply.message)
    }

    async fn fetch_models(&self) -> BackendResult<Vec<ModelEntry>> {
        let models_url = construct_api_url(&self.base_url, "api/models");

        let response = self.client.get(models_url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(format!("model listing failed with status {status}: {error_text}").into());
        }

        let models = response.json::<Vec<ModelEntry>>().await?;
        Ok(models)
    }

    async fn check_health(&self) -> bool {
        let health_url = construct_api_url(&self.base_url, "api/health");

        let response = match self.client.get(health_url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("health probe failed: {e}");
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("health probe returned status {}", response.status());
            return false;
        }

        match response.json::<HealthReply>().await {
            Ok(reply) => reply.status == HEALTHY_STATUS,
            Err(e) => {
                tracing::debug!("health probe returned malformed body: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_literal_is_exact() {
        let reply: HealthReply = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
        assert_eq!(reply.status, HEALTHY_STATUS);

        let degraded: HealthReply = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert_ne!(degraded.status, HEALTHY_STATUS);
    }

    #[test]
    fn endpoint_urls_join_without_double_slashes() {
        let backend = HttpBackend::new("http://localhost:5000/");
        assert_eq!(
            construct_api_url(backend.base_url(), "api/chat"),
            "http://localhost:5000/api/chat"
        );
        assert_eq!(
            construct_api_url(backend.base_url(), "api/models"),
            "http://localhost:5000/api/models"
        );
    }
}
