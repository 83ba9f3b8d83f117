/// Agent Client — the single point of entry for calls to the external job-search agent.
///
/// No other module talks to the agent service directly. The client only transports:
/// it hands back the agent's `result` untouched as a `RawAgentReply`, and a failed call
/// never reaches the extractor.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::search::models::RawAgentReply;

pub mod prompts;

/// The job search coordinator agent.
pub const DEFAULT_AGENT_ID: &str = "6999596f938bc0103dbe0bec";
const MAX_RETRIES: u32 = 3;
const DEFAULT_FAILURE_MESSAGE: &str =
    "An error occurred while searching for jobs. Please try again.";

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Agent rejected the request: {0}")]
    Rejected(String),

    #[error("Envelope decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Agent unavailable after {retries} retries")]
    RetriesExhausted { retries: u32 },
}

impl AgentError {
    /// Message safe to show to the person who started the search.
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Http(_) | AgentError::RetriesExhausted { .. } => {
                "Network error. Please check your connection and try again.".to_string()
            }
            AgentError::Rejected(message) => message.clone(),
            AgentError::Api { .. } | AgentError::Decode(_) => DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Wait before retry `attempt` (1-based): 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 << attempt.saturating_sub(1))
}

#[derive(Debug, Serialize)]
struct AgentRequest<'a> {
    agent_id: &'a str,
    message: &'a str,
    assets: &'a [String],
}

/// Transport envelope returned by the agent service.
#[derive(Debug, Deserialize)]
struct AgentEnvelope {
    #[serde(default)]
    success: bool,
    response: Option<AgentResponseBody>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AgentResponseBody {
    #[serde(default)]
    result: Value,
    message: Option<String>,
}

impl AgentEnvelope {
    fn into_reply(self) -> Result<RawAgentReply, AgentError> {
        if !self.success {
            let message = self
                .error
                .or_else(|| self.response.and_then(|r| r.message))
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            return Err(AgentError::Rejected(message));
        }

        let result = self.response.map(|r| r.result).unwrap_or_default();
        Ok(RawAgentReply::from(result))
    }
}

/// Anything that can run the job-search agent. Carried in `AppState` as `Arc<dyn AgentInvoker>`.
#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn invoke(&self, message: &str, attachments: &[String])
        -> Result<RawAgentReply, AgentError>;
}

/// HTTP client for the hosted agent service.
/// Retries on 429 and 5xx with exponential backoff.
#[derive(Clone)]
pub struct HttpAgentClient {
    client: Client,
    api_url: String,
    api_key: String,
    agent_id: String,
}

impl HttpAgentClient {
    pub fn new(
        api_url: String,
        api_key: String,
        agent_id: String,
        timeout_secs: u64,
    ) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url,
            api_key,
            agent_id,
        })
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }
}

#[async_trait]
impl AgentInvoker for HttpAgentClient {
    async fn invoke(
        &self,
        message: &str,
        attachments: &[String],
    ) -> Result<RawAgentReply, AgentError> {
        let request_body = AgentRequest {
            agent_id: &self.agent_id,
            message,
            assets: attachments,
        };

        let mut last_error: Option<AgentError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "Agent call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AgentError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Agent API returned {}: {}", status, body);
                last_error = Some(AgentError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(AgentError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await?;
            let envelope: AgentEnvelope = serde_json::from_str(&body)?;
            debug!(
                "Agent call finished: success={}, attachments={}",
                envelope.success,
                attachments.len()
            );

            return envelope.into_reply();
        }

        Err(last_error.unwrap_or(AgentError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> AgentEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_successful_envelope_yields_structured_reply() {
        let reply = envelope(json!({
            "success": true,
            "response": {"result": {"ranked_jobs": []}}
        }))
        .into_reply()
        .unwrap();
        assert_eq!(reply, RawAgentReply::Structured(json!({"ranked_jobs": []})));
    }

    #[test]
    fn test_successful_envelope_with_string_result_yields_text() {
        let reply = envelope(json!({
            "success": true,
            "response": {"result": "Here are your jobs: {}"}
        }))
        .into_reply()
        .unwrap();
        assert_eq!(reply, RawAgentReply::Text("Here are your jobs: {}".to_string()));
    }

    #[test]
    fn test_missing_result_yields_null_reply() {
        let reply = envelope(json!({"success": true})).into_reply().unwrap();
        assert_eq!(reply, RawAgentReply::Structured(Value::Null));
    }

    #[test]
    fn test_failed_envelope_prefers_error_field() {
        let err = envelope(json!({
            "success": false,
            "error": "Agent quota exceeded",
            "response": {"message": "ignored"}
        }))
        .into_reply()
        .unwrap_err();
        assert_eq!(err.user_message(), "Agent quota exceeded");
    }

    #[test]
    fn test_failed_envelope_falls_back_to_response_message() {
        let err = envelope(json!({
            "success": false,
            "response": {"message": "Agent timed out"}
        }))
        .into_reply()
        .unwrap_err();
        assert_eq!(err.user_message(), "Agent timed out");
    }

    #[test]
    fn test_failed_envelope_without_message_uses_default() {
        let err = envelope(json!({})).into_reply().unwrap_err();
        assert_eq!(err.user_message(), DEFAULT_FAILURE_MESSAGE);
    }

    #[test]
    fn test_request_serializes_assets() {
        let assets = vec!["asset-1".to_string()];
        let body = serde_json::to_value(AgentRequest {
            agent_id: DEFAULT_AGENT_ID,
            message: "find jobs",
            assets: &assets,
        })
        .unwrap();
        assert_eq!(body["assets"], json!(["asset-1"]));
        assert_eq!(body["agent_id"], DEFAULT_AGENT_ID);
    }

    #[test]
    fn test_retries_exhausted_reads_as_network_error() {
        let err = AgentError::RetriesExhausted { retries: 3 };
        assert!(err.user_message().starts_with("Network error"));
    }

    #[test]
    fn test_backoff_sleeps_between_attempts_only() {
        let delays: Vec<Duration> = (1..MAX_RETRIES).map(backoff_delay).collect();
        assert_eq!(
            delays,
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }
}
