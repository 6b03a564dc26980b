//! Grafana alert notification and the WhatsApp delivery request built from it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{finite_f32, null_as_default};

/// Alert state Grafana reports once a rule is healthy again
pub const STATE_OK: &str = "ok";

// =============================================================================
// Inbound
// =============================================================================

/// Legacy Grafana webhook notifier body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertNotification {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rule_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rule_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub eval_matches: Vec<EvalMatch>,
    #[serde(deserialize_with = "null_as_default")]
    pub org_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub dashboard_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub panel_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: HashMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub rule_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

impl AlertNotification {
    /// True when the rule has returned to a healthy state
    pub fn is_ok(&self) -> bool {
        self.state == STATE_OK
    }
}

/// One breached metric reported by the alert rule
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EvalMatch {
    #[serde(deserialize_with = "finite_f32")]
    pub value: f32,
    #[serde(deserialize_with = "null_as_default")]
    pub metric: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: HashMap<String, String>,
}

// =============================================================================
// Outbound
// =============================================================================

/// Template message request accepted by the WhatsApp delivery API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundAlertRequest {
    pub token: String,
    #[serde(rename = "to")]
    pub destinations: Vec<String>,
    /// Always `[title, message, metrics]`
    #[serde(rename = "param")]
    pub parameters: Vec<String>,
}
