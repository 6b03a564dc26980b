//! Grafana alert -> WhatsApp template message.

use std::sync::Arc;

use crate::config::{OutboundConfig, WhatsappConfig};
use crate::error::{AppError, AppResult};
use crate::models::{AlertNotification, EvalMatch, OutboundAlertRequest};
use crate::services::sender::{check_status, OutboundSender};

/// Rendered in place of an absent message or metrics summary
pub const PLACEHOLDER: &str = "-";

/// Forwards each alert as one delivery API request
pub struct AlertForwarder {
    config: WhatsappConfig,
    outbound: OutboundConfig,
    sender: Arc<dyn OutboundSender>,
}

impl AlertForwarder {
    pub fn new(
        config: WhatsappConfig,
        outbound: OutboundConfig,
        sender: Arc<dyn OutboundSender>,
    ) -> Self {
        Self {
            config,
            outbound,
            sender,
        }
    }

    /// Builds the delivery request for `alert`
    pub fn build_request(&self, alert: &AlertNotification) -> OutboundAlertRequest {
        OutboundAlertRequest {
            token: self.config.token.clone(),
            destinations: self.config.destinations.clone(),
            parameters: vec![
                alert.title.clone(),
                render_message(alert),
                render_metrics(&alert.eval_matches),
            ],
        }
    }

    /// Sends `alert` to the delivery API.
    ///
    /// The delivery API's status code does not affect the result unless
    /// strict status checking is enabled.
    pub async fn forward(&self, alert: &AlertNotification) -> AppResult<()> {
        log::info!(
            "Alert received: title={:?} state={:?} matches={}",
            alert.title,
            alert.state,
            alert.eval_matches.len()
        );
        log::debug!(
            "Alert rule={} org={} dashboard={} panel={} tags={:?}",
            alert.rule_id,
            alert.org_id,
            alert.dashboard_id,
            alert.panel_id,
            alert.tags
        );
        for eval_match in &alert.eval_matches {
            log::debug!("Match {} tags: {:?}", eval_match.metric, eval_match.tags);
        }

        let request = self.build_request(alert);
        let body = serde_json::to_value(&request)
            .map_err(|e| AppError::Upstream(format!("Failed to serialize alert request: {}", e)))?;

        log::info!("WhatsApp request params: {:?}", request.parameters);

        let response = self
            .sender
            .post_json(&self.config.delivery_url, &body)
            .await
            .map_err(|e| {
                log::error!("Request to WhatsApp delivery API failed: {}", e);
                AppError::Upstream(e.to_string())
            })?;

        log::info!(
            "WhatsApp response ({}): {}",
            response.status,
            response.body
        );

        check_status(&response, self.outbound.strict_status).map_err(|e| {
            log::error!("WhatsApp delivery API rejected alert: {}", e);
            AppError::Upstream(e.to_string())
        })
    }
}

/// The alert message, or the placeholder once the alert has resolved
pub fn render_message(alert: &AlertNotification) -> String {
    if alert.is_ok() {
        PLACEHOLDER.to_string()
    } else {
        alert.message.clone()
    }
}

/// `"<metric>: <value>"` per match, comma separated, values to 6 decimals
pub fn render_metrics(matches: &[EvalMatch]) -> String {
    if matches.is_empty() {
        return PLACEHOLDER.to_string();
    }

    matches
        .iter()
        .map(|m| format!("{}: {:.6}", m.metric, m.value))
        .collect::<Vec<_>>()
        .join(", ")
}
