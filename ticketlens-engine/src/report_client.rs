use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ticketlens_core::config::ReportConfig;
use ticketlens_core::serde_utils::to_compact_json;
use ticketlens_protocol::ticket::TicketCollection;
use tracing::{debug, info};
use url::Url;

pub const SYSTEM_INSTRUCTION: &str = "You are an AI that analyzes ticket data trends.";

/// How much prose to ask the model for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportDetail {
    Brief,
    #[default]
    Detailed,
}

impl ReportDetail {
    fn instruction(self) -> &'static str {
        match self {
            ReportDetail::Brief => "Provide a concise summary in a few short paragraphs.",
            ReportDetail::Detailed => {
                "Provide a detailed report covering trends over time, the most raised ticket \
                 categories, the status and priority mix, notable customers, products and \
                 cities, and recommendations."
            }
        }
    }
}

impl fmt::Display for ReportDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportDetail::Brief => f.write_str("brief"),
            ReportDetail::Detailed => f.write_str("detailed"),
        }
    }
}

impl FromStr for ReportDetail {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "brief" | "summary" => Ok(ReportDetail::Brief),
            "detailed" | "full" => Ok(ReportDetail::Detailed),
            other => Err(format!("unknown report detail '{other}' (expected brief or detailed)")),
        }
    }
}

/// System and user instructions for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub system: String,
    pub user: String,
}

impl ReportRequest {
    /// Embeds the filtered tickets, as JSON records, and the original prompt.
    pub fn build(
        prompt: &str,
        tickets: &TicketCollection,
        detail: ReportDetail,
    ) -> Result<Self, ReportError> {
        let records = to_compact_json(&tickets.records_json())
            .map_err(|err| ReportError::Encode(err.to_string()))?;
        let prompt = prompt.trim().trim_end_matches(['.', '?', '!']);

        let user = format!(
            "Ticket data ({count} records, JSON):\n{records}\n\n\
             Based on the ticket data, {prompt}. {instruction}",
            count = tickets.len(),
            instruction = detail.instruction(),
        );

        Ok(Self {
            system: SYSTEM_INSTRUCTION.to_string(),
            user,
        })
    }
}

/// Opaque prose generator used for per-prompt reports.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, request: &ReportRequest) -> Result<String, ReportError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat completion client. One call per report, no
/// retries, no streaming.
#[derive(Clone)]
pub struct OpenAiReportClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl OpenAiReportClient {
    pub fn new(config: &ReportConfig, timeout: Duration) -> Result<Self, ReportError> {
        let mut base = config.base_url.clone();
        if !base.path().ends_with('/') {
            let mut path = base.path().trim_end_matches('/').to_string();
            path.push('/');
            base.set_path(&path);
        }
        let endpoint = base
            .join("chat/completions")
            .map_err(|err| ReportError::Client(err.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ReportError::Client(err.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ReportGenerator for OpenAiReportClient {
    async fn generate(&self, request: &ReportRequest) -> Result<String, ReportError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
        };

        debug!(model = %self.model, prompt_bytes = request.user.len(), "requesting report");
        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| ReportError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReportError::UnexpectedStatus { status, body });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| ReportError::Decode(err.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ReportError::EmptyCompletion)?;

        info!(model = %self.model, chars = text.len(), "report generated");
        Ok(text)
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to build report client: {0}")]
    Client(String),
    #[error("failed to encode ticket data: {0}")]
    Encode(String),
    #[error("report request failed: {0}")]
    Http(String),
    #[error("report API returned {status}: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode report response: {0}")]
    Decode(String),
    #[error("report API returned no text")]
    EmptyCompletion,
}
