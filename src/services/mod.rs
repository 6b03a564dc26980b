pub mod alert_forwarder;
pub mod event_relay;
pub mod sender;

pub use alert_forwarder::{render_message, render_metrics, AlertForwarder, PLACEHOLDER};
pub use event_relay::{build_notification, EventRelay};
pub use sender::{HttpSender, OutboundResponse, OutboundSender};
