//! Analysis endpoint client.
//!
//! The endpoint accepts an HTTP POST with a JSON body
//! `{messages: [{role, content}], image?}` and answers with either
//! `{result: <markup>}` or `{error, detail?}`. Application errors travel in
//! the body rather than the status line, so the body is parsed regardless of
//! status; a body that fits neither shape is an unrecognized response.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use scry_core::session::ConversationMessage;
use scry_core::{Result, ScryError};

/// A successful analysis reply, carrying markup to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReply {
    pub markup: String,
}

/// Seam for the remote analysis endpoint.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Sends the transcript and, when given, an encoded image. One request,
    /// one outcome; no retries.
    async fn analyze(
        &self,
        messages: &[ConversationMessage],
        image: Option<&str>,
    ) -> Result<AnalysisReply>;
}

/// HTTP implementation of [`AnalysisApi`].
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn build_request<'a>(
        messages: &'a [ConversationMessage],
        image: Option<&'a str>,
    ) -> AnalyzeRequest<'a> {
        AnalyzeRequest {
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            image,
        }
    }

    fn interpret(response: AnalyzeResponse) -> Result<AnalysisReply> {
        if let Some(markup) = response.result {
            return Ok(AnalysisReply { markup });
        }
        if let Some(error) = response.error {
            return Err(ScryError::remote(error, response.detail));
        }
        Err(ScryError::UnrecognizedResponse)
    }
}

#[async_trait]
impl AnalysisApi for AnalysisClient {
    async fn analyze(
        &self,
        messages: &[ConversationMessage],
        image: Option<&str>,
    ) -> Result<AnalysisReply> {
        let body = Self::build_request(messages, image);
        tracing::debug!(
            "posting {} messages to {} (image attached: {})",
            body.messages.len(),
            self.endpoint,
            body.image.is_some()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScryError::transport(e.to_string()))?;

        let parsed: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| ScryError::transport(format!("failed to parse response: {e}")))?;

        Self::interpret(parsed)
    }
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    result: Option<String>,
    error: Option<String>,
    detail: Option<String>,
}
