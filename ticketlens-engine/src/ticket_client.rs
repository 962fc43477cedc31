use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use ticketlens_core::config::TicketSourceConfig;
use ticketlens_core::serde_utils::from_json_bytes;
use ticketlens_protocol::source::{decode_ticket_payload, FetchRequest, PayloadError};
use ticketlens_protocol::ticket::TicketCollection;
use tracing::{debug, info};
use url::Url;

/// Anything that can produce the ticket working set.
#[async_trait]
pub trait TicketSource: Send + Sync {
    async fn fetch_tickets(&self) -> Result<TicketCollection, FetchError>;
}

/// Typed HTTP client for the upstream ticket endpoint. One POST per fetch,
/// no retries.
#[derive(Clone)]
pub struct TicketApiClient {
    http: reqwest::Client,
    url: Url,
    request: FetchRequest,
}

impl TicketApiClient {
    pub fn new(config: &TicketSourceConfig, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| FetchError::Client(err.to_string()))?;

        Ok(Self {
            http,
            url: config.url.clone(),
            request: fetch_request(config),
        })
    }

    /// Points the client at another endpoint, keeping the request body.
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = url;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn request(&self) -> &FetchRequest {
        &self.request
    }
}

#[async_trait]
impl TicketSource for TicketApiClient {
    async fn fetch_tickets(&self) -> Result<TicketCollection, FetchError> {
        debug!(url = %self.url, "requesting tickets");
        let response = self
            .http
            .post(self.url.clone())
            .json(&self.request)
            .send()
            .await
            .map_err(|err| FetchError::Http(err.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::UnexpectedStatus { status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| FetchError::Http(err.to_string()))?;
        let payload: serde_json::Value =
            from_json_bytes(&body).map_err(|err| FetchError::Decode(err.to_string()))?;
        let tickets = decode_ticket_payload(payload)?;

        info!(tickets = tickets.len(), "fetched tickets");
        Ok(tickets)
    }
}

/// Maps the source configuration onto the static request body.
pub fn fetch_request(config: &TicketSourceConfig) -> FetchRequest {
    FetchRequest {
        input_mode: config.input_mode.clone(),
        application: config.application.clone(),
        device: config.device.clone(),
        version_no: config.version_no.clone(),
        location_id: config.location_id.clone(),
        system_id: config.system_id.clone(),
        org_id: config.org_id.clone(),
        signin_type: config.signin_type.clone(),
        token: config.token.clone(),
        app_domain: config.app_domain.clone(),
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("ticket request failed: {0}")]
    Http(String),
    #[error("ticket API returned unexpected status {status}")]
    UnexpectedStatus { status: reqwest::StatusCode },
    #[error("failed to decode ticket response: {0}")]
    Decode(String),
    #[error("unexpected ticket response: {0}")]
    Payload(#[from] PayloadError),
}
