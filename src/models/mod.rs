pub mod alert;
pub mod chat;
pub mod message_event;

use serde::{Deserialize, Deserializer};

pub use alert::{AlertNotification, EvalMatch, OutboundAlertRequest};
pub use chat::{ChatAttachment, ChatField, ChatNotification};
pub use message_event::{MessageData, MessageEvent, RelayParams, Retry, Schedule};

/// Deserializes an explicit JSON `null` as the type's default value.
///
/// Grafana and Wassenger both emit `null` for unset fields; those decode the
/// same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a 32-bit float, rejecting values that do not fit.
///
/// `null` decodes as `0.0`.
pub(crate) fn finite_f32<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or_default();
    let narrowed = value as f32;

    if !narrowed.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "value {} out of range for float32",
            value
        )));
    }

    Ok(narrowed)
}
