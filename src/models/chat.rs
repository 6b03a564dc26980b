//! Slack incoming-webhook message with a single attachment.

use serde::Serialize;

/// Attachment color used for every relayed event
pub const COLOR_GOOD: &str = "good";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatNotification {
    pub attachments: Vec<ChatAttachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatAttachment {
    pub fallback: String,
    pub pretext: String,
    pub color: String,
    pub fields: Vec<ChatField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl ChatField {
    /// Creates a short (side-by-side) field
    pub fn short(title: &str, value: &str) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            short: true,
        }
    }
}

impl ChatNotification {
    /// Wraps `fields` in a single "good" attachment whose fallback and
    /// pretext are both `text`
    pub fn single(text: &str, fields: Vec<ChatField>) -> Self {
        Self {
            attachments: vec![ChatAttachment {
                fallback: text.to_string(),
                pretext: text.to_string(),
                color: COLOR_GOOD.to_string(),
                fields,
            }],
        }
    }
}
