//! Outbound HTTP delivery.
//!
//! Both webhook paths deliver through the [`OutboundSender`] trait so the
//! transport can be swapped for a recording fake in tests.

use async_trait::async_trait;

use crate::config::OutboundConfig;
use crate::error::SendError;

/// Status and body of a completed outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundResponse {
    pub status: u16,
    pub body: String,
}

impl OutboundResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Posts a JSON body to a URL and reads back the response
#[async_trait]
pub trait OutboundSender: Send + Sync {
    /// Send `body` as `application/json`.
    ///
    /// Any HTTP status is returned as `Ok`; only a failure to send or to read
    /// the response body is an error.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<OutboundResponse, SendError>;
}

/// reqwest-backed sender
pub struct HttpSender {
    client: reqwest::Client,
}

impl HttpSender {
    /// Creates a sender whose client applies `config.timeout` to every call
    pub fn new(config: &OutboundConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl OutboundSender for HttpSender {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<OutboundResponse, SendError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SendError::Body(e.to_string()))?;

        Ok(OutboundResponse { status, body })
    }
}

/// Turns a non-2xx response into [`SendError::Status`] when `strict` is set
pub fn check_status(response: &OutboundResponse, strict: bool) -> Result<(), SendError> {
    if strict && !response.is_success() {
        return Err(SendError::Status(response.status));
    }
    Ok(())
}
