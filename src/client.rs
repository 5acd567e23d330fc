//! HTTP client for the agent service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::AgentConfig;
use crate::error::BatchError;
use crate::events::Event;

/// The two calls a batch run makes against an agent service.
#[async_trait]
pub trait AgentService: Send + Sync {
    /// Creates a conversational session and returns its id.
    async fn create_session(&self) -> Result<String, BatchError>;

    /// Sends one user message into `session_id` and returns the resulting events.
    async fn run(&self, session_id: &str, question: &str) -> Result<Vec<Event>, BatchError>;
}

#[derive(Serialize)]
struct RunRequest<'a> {
    app_name: &'a str,
    user_id: &'a str,
    session_id: &'a str,
    new_message: NewMessage<'a>,
    streaming: bool,
}

#[derive(Serialize)]
struct NewMessage<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

/// Agent service reached over HTTP.
///
/// Configuration sits behind an `Arc`, so clones share it.
#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    pub config: Arc<AgentConfig>,
    pub client: Client,
}

impl HttpAgentClient {
    pub fn new(config: AgentConfig) -> Result<Self, BatchError> {
        let mut builder = Client::builder();
        if let Some(sec) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    /// Creates a client around an existing reqwest `Client`.
    pub fn with_client(client: Client, config: AgentConfig) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }
}

#[async_trait]
impl AgentService for HttpAgentClient {
    async fn create_session(&self) -> Result<String, BatchError> {
        let url = self.config.sessions_url();
        log::debug!("creating session at {url}");

        let resp = self.client.post(url.as_str()).send().await?;
        log::debug!("session HTTP status: {}", resp.status());
        let resp = resp.error_for_status()?;

        let raw = resp.text().await?;
        let body: Value = serde_json::from_str(&raw)?;
        match body.get("id").and_then(Value::as_str) {
            Some(id) => Ok(id.to_string()),
            None => Err(BatchError::SessionFormatError {
                message: "missing string field `id`".to_string(),
                raw_response: raw,
            }),
        }
    }

    async fn run(&self, session_id: &str, question: &str) -> Result<Vec<Event>, BatchError> {
        let body = RunRequest {
            app_name: &self.config.app_name,
            user_id: &self.config.user_id,
            session_id,
            new_message: NewMessage {
                role: "user",
                parts: vec![TextPart { text: question }],
            },
            streaming: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("run request payload: {}", json);
            }
        }

        let resp = self
            .client
            .post(self.config.run_url())
            .json(&body)
            .send()
            .await?;
        log::debug!("run HTTP status: {}", resp.status());
        let resp = resp.error_for_status()?;

        let raw = resp.text().await?;
        log::debug!("raw run response: {raw}");
        Ok(serde_json::from_str(&raw)?)
    }
}
