//! Ollama chat client for local inference.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{InvocationError, ModelClient};

/// Client for an Ollama server's `/api/chat` endpoint, requesting JSON-mode output.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    format: &'static str,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

impl OllamaClient {
    /// Create a client for `model` served at `base_url` (e.g. `http://localhost:11434`).
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InvocationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        })
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, InvocationError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt.trim(),
            }],
            format: "json",
            stream: false,
        };

        debug!(url = %url, model = %self.model, "sending prompt");
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InvocationError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = resp.json().await.map_err(|e| self.classify(e))?;
        let content = reply
            .message
            .map(|m| m.content)
            .ok_or_else(|| InvocationError::Envelope("missing `message` field".into()))?;
        info!(model = %self.model, chars = content.len(), "model replied");
        Ok(content)
    }
}

impl OllamaClient {
    fn classify(&self, err: reqwest::Error) -> InvocationError {
        if err.is_timeout() {
            InvocationError::Timeout(self.timeout)
        } else if err.is_decode() {
            InvocationError::Envelope(err.to_string())
        } else {
            InvocationError::Http(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> OllamaClient {
        OllamaClient::new(&server.base_url(), "llama3", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn trims_trailing_slash() {
        let client =
            OllamaClient::new("http://localhost:11434/", "llama3", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model(), "llama3");
    }

    #[tokio::test]
    async fn requests_json_format_and_returns_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat").json_body(json!({
                    "model": "llama3",
                    "messages": [{"role": "user", "content": "Find Diebold"}],
                    "format": "json",
                    "stream": false
                }));
                then.status(200).json_body(json!({
                    "model": "llama3",
                    "message": {"role": "assistant", "content": "{\"G2 Reviews Query\": \"x\"}"},
                    "done": true
                }));
            })
            .await;

        let reply = client(&server).generate("  Find Diebold\n").await.unwrap();
        mock.assert_async().await;
        assert_eq!(reply, r#"{"G2 Reviews Query": "x"}"#);
    }

    #[tokio::test]
    async fn server_error_is_invocation_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(404).body("model 'llama3' not found");
            })
            .await;

        let err = client(&server).generate("prompt").await.unwrap_err();
        assert!(matches!(
            err,
            InvocationError::Server { status: 404, ref body } if body.contains("not found")
        ));
    }

    #[tokio::test]
    async fn slow_server_is_timeout_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(json!({"message": {"role": "assistant", "content": "{}"}}));
            })
            .await;

        let slow = OllamaClient::new(&server.base_url(), "llama3", Duration::from_millis(50)).unwrap();
        let err = slow.generate("prompt").await.unwrap_err();
        assert!(
            matches!(err, InvocationError::Timeout(t) if t == Duration::from_millis(50)),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn missing_message_is_envelope_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(200).json_body(json!({"error": "busy"}));
            })
            .await;

        let err = client(&server).generate("prompt").await.unwrap_err();
        assert!(matches!(err, InvocationError::Envelope(_)));
    }
}
