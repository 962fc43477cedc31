use std::env;

use url::Url;

use crate::errors::{ConfigError, TicketLensError};

pub const DEFAULT_SOURCE_URL: &str = "https://tessapp.tess360.com/getTicket_IncidenceData";
pub const DEFAULT_REPORT_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_REPORT_MODEL: &str = "gpt-4";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Static request parameters sent to the upstream ticket endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSourceConfig {
    pub url: Url,
    pub input_mode: String,
    pub application: String,
    pub device: String,
    pub version_no: String,
    pub location_id: String,
    pub system_id: String,
    pub org_id: String,
    pub signin_type: String,
    pub token: String,
    pub app_domain: String,
}

impl TicketSourceConfig {
    /// Loads the source configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let url = parse_url(
            "TICKETLENS_SOURCE_URL",
            &value_or("TICKETLENS_SOURCE_URL", DEFAULT_SOURCE_URL),
        )?;
        let token = lookup("TICKETLENS_SOURCE_TOKEN")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("TICKETLENS_SOURCE_TOKEN".into()))?;

        Ok(Self {
            url,
            input_mode: value_or("TICKETLENS_INPUT_MODE", "M"),
            application: value_or("TICKETLENS_APPLICATION", "W"),
            device: value_or("TICKETLENS_DEVICE", "W"),
            version_no: value_or("TICKETLENS_VERSION_NO", "1.0.0"),
            location_id: value_or("TICKETLENS_LOCATION_ID", "244"),
            system_id: value_or("TICKETLENS_SYSTEM_ID", "S"),
            org_id: value_or("TICKETLENS_ORG_ID", "315"),
            signin_type: value_or("TICKETLENS_SIGNIN_TYPE", "P"),
            token,
            app_domain: value_or("TICKETLENS_APP_DOMAIN", "tmsys360.com"),
        })
    }
}

/// Settings for the OpenAI-compatible completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub base_url: Url,
    pub api_key: String,
    pub model: String,
}

impl ReportConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("TICKETLENS_REPORT_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REPORT_URL.to_string());
        let base_url = parse_url("TICKETLENS_REPORT_URL", &raw_url)?;

        let api_key = lookup("OPENAI_API_KEY")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".into()))?;

        let model = lookup("TICKETLENS_REPORT_MODEL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REPORT_MODEL.to_string());

        Ok(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Global configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct TicketLensConfig {
    pub source: TicketSourceConfig,
    pub report: ReportConfig,
    pub http_timeout_secs: u64,
    pub log_level: String,
}

impl TicketLensConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = TicketSourceConfig::from_lookup(&lookup)?;
        let report = ReportConfig::from_lookup(&lookup)?;

        let http_timeout_secs = match lookup("TICKETLENS_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|err| ConfigError::InvalidEnvVar {
                    key: "TICKETLENS_HTTP_TIMEOUT_SECS".into(),
                    message: err.to_string(),
                })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let log_level = lookup("TICKETLENS_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            source,
            report,
            http_timeout_secs,
            log_level,
        })
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        key: key.to_string(),
        source,
    })
}

/// Helper that loads config and converts to the canonical TicketLens error type.
pub fn load_config() -> Result<TicketLensConfig, TicketLensError> {
    Ok(TicketLensConfig::from_env()?)
}
