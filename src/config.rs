use std::env;
use std::time::Duration;

/// Delivery API endpoint used when `WHATSAPP_DELIVERY_URL` is not set
pub const DEFAULT_DELIVERY_URL: &str =
    "https://waba.damcorp.id/whatsapp/sendHsm/pawoon_server_alert_v2";

/// Request body cap used when `MAX_BODY_BYTES` is not set
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub inbound: InboundConfig,
    pub whatsapp: WhatsappConfig,
    pub relay: RelayConfig,
    pub outbound: OutboundConfig,
}

/// Limits applied to inbound webhook requests
#[derive(Debug, Clone)]
pub struct InboundConfig {
    /// Bodies larger than this are rejected as unprocessable
    pub max_body_bytes: usize,
}

/// Settings for the Grafana -> WhatsApp alert path
#[derive(Debug, Clone)]
pub struct WhatsappConfig {
    pub delivery_url: String,
    /// Token placed in every outbound alert request
    pub token: String,
    pub destinations: Vec<String>,
}

/// Settings for the Wassenger -> Slack relay path
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Shared secret expected in the `token` query parameter
    pub app_token: String,
    pub slack_webhook_url: String,
    /// When true, requests must carry a non-empty `account` and the
    /// notification gains the Account and Message fields
    pub require_account: bool,
}

/// Settings shared by every outbound call
#[derive(Debug, Clone)]
pub struct OutboundConfig {
    pub timeout: Duration,
    /// Treat non-2xx downstream responses as failures
    pub strict_status: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            inbound: InboundConfig::from_env(),
            whatsapp: WhatsappConfig::from_env()?,
            relay: RelayConfig::from_env()?,
            outbound: OutboundConfig::from_env(),
        })
    }
}

impl InboundConfig {
    /// Load inbound request limits from environment variables
    pub fn from_env() -> Self {
        Self {
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
        }
    }
}

impl Default for InboundConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl WhatsappConfig {
    /// Load WhatsApp delivery configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let delivery_url =
            env::var("WHATSAPP_DELIVERY_URL").unwrap_or_else(|_| DEFAULT_DELIVERY_URL.to_string());
        validate_url("WHATSAPP_DELIVERY_URL", &delivery_url)?;

        Ok(Self {
            delivery_url,
            token: env::var("DAMCORP_TOKEN").unwrap_or_default(),
            destinations: parse_destinations(&env::var("WHATSAPP_DESTINATIONS").unwrap_or_default()),
        })
    }
}

impl RelayConfig {
    /// Load relay configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_token = env::var("APP_TOKEN").unwrap_or_default();
        if app_token.is_empty() {
            log::warn!("APP_TOKEN not set, relay requests with an empty token will be accepted");
        }

        let slack_webhook_url = env::var("SLACK_WEBHOOK_URL").unwrap_or_default();
        if slack_webhook_url.is_empty() {
            log::warn!("SLACK_WEBHOOK_URL not set, relayed events will fail to send");
        } else {
            validate_url("SLACK_WEBHOOK_URL", &slack_webhook_url)?;
        }

        Ok(Self {
            app_token,
            slack_webhook_url,
            require_account: parse_flag(env::var("RELAY_REQUIRE_ACCOUNT").ok(), true),
        })
    }
}

impl OutboundConfig {
    /// Load outbound client configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            timeout: Duration::from_secs(
                env::var("OUTBOUND_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .unwrap_or(30),
            ),
            strict_status: parse_flag(env::var("STRICT_UPSTREAM_STATUS").ok(), false),
        }
    }
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            strict_status: false,
        }
    }
}

/// Splits the comma-separated destination list.
///
/// Entries are not trimmed, and an empty value yields a single empty
/// destination.
pub fn parse_destinations(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

fn validate_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value).map_err(|_| ConfigError::InvalidUrl(name))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(name));
    }

    Ok(())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidUrl(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid number"),
            ConfigError::InvalidUrl(name) => {
                write!(f, "{} must be a valid http or https URL", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
