//! Wassenger message events -> Slack notifications.

use std::sync::Arc;

use crate::config::{OutboundConfig, RelayConfig};
use crate::error::{AppError, AppResult};
use crate::models::{ChatField, ChatNotification, MessageEvent, RelayParams};
use crate::services::sender::{check_status, OutboundSender};

/// Validates relay requests and posts one Slack message per event
pub struct EventRelay {
    config: RelayConfig,
    outbound: OutboundConfig,
    sender: Arc<dyn OutboundSender>,
}

impl EventRelay {
    pub fn new(
        config: RelayConfig,
        outbound: OutboundConfig,
        sender: Arc<dyn OutboundSender>,
    ) -> Self {
        Self {
            config,
            outbound,
            sender,
        }
    }

    /// Checks the shared token and, when accounts are required, that one
    /// was given.
    ///
    /// Returns the account to label notifications with, or `None` when
    /// notifications carry no account.
    pub fn authenticate<'a>(&self, params: &'a RelayParams) -> AppResult<Option<&'a str>> {
        log::info!("Relay request account={:?}", params.account);

        if params.token != self.config.app_token {
            log::error!("Relay token mismatch");
            return Err(AppError::Forbidden("token mismatch".to_string()));
        }

        if !self.config.require_account {
            return Ok(None);
        }

        if params.account.is_empty() {
            log::error!("Relay account empty");
            return Err(AppError::Forbidden("account empty".to_string()));
        }

        Ok(Some(params.account.as_str()))
    }

    /// Posts each event in order, stopping at the first failed delivery.
    ///
    /// Returns the number of notifications sent.
    pub async fn relay(&self, account: Option<&str>, events: &[MessageEvent]) -> AppResult<usize> {
        for (index, event) in events.iter().enumerate() {
            let notification = build_notification(event, account);
            let body = serde_json::to_value(&notification).map_err(|e| {
                AppError::Upstream(format!("Failed to serialize notification: {}", e))
            })?;

            log::info!("Slack request body: {}", body);

            let response = self
                .sender
                .post_json(&self.config.slack_webhook_url, &body)
                .await
                .map_err(|e| {
                    log::error!(
                        "Request to Slack failed for event {} of {}: {}",
                        index + 1,
                        events.len(),
                        e
                    );
                    AppError::Upstream(e.to_string())
                })?;

            log::info!("Slack response code: {}", response.status);
            log::info!("Slack response body: {}", response.body);

            check_status(&response, self.outbound.strict_status).map_err(|e| {
                log::error!("Slack rejected event {} of {}: {}", index + 1, events.len(), e);
                AppError::Upstream(e.to_string())
            })?;
        }

        Ok(events.len())
    }
}

/// Builds the Slack message for one event.
///
/// Without an account the fields are Phone and Status; with one they are
/// Account, Phone, Status and Message.
pub fn build_notification(event: &MessageEvent, account: Option<&str>) -> ChatNotification {
    let data = &event.data;

    let fields = match account {
        Some(account) => vec![
            ChatField::short("Account", account),
            ChatField::short("Phone", &data.phone),
            ChatField::short("Status", &data.status),
            ChatField::short("Message", &data.message),
        ],
        None => vec![
            ChatField::short("Phone", &data.phone),
            ChatField::short("Status", &data.status),
        ],
    };

    ChatNotification::single(&event.message, fields)
}
