use actix_web::{web, HttpResponse};

use crate::config::InboundConfig;
use crate::error::{AppError, AppResult};
use crate::models::AlertNotification;
use crate::routes::{body_limit, read_body, MessageResponse};
use crate::services::AlertForwarder;

/// POST /webhook/whatsapp
/// Forwards a Grafana alert notification to WhatsApp
pub async fn send_alert(
    forwarder: web::Data<AlertForwarder>,
    inbound: Option<web::Data<InboundConfig>>,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let body = read_body(payload, body_limit(inbound)).await?;

    let alert: AlertNotification = serde_json::from_slice(&body).map_err(|e| {
        log::error!("Request body not match: {}", e);
        AppError::Validation(format!("Invalid alert JSON: {}", e))
    })?;

    forwarder.forward(&alert).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Whatsapp alert sent",
    }))
}

/// Configures the WhatsApp alert route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhook/whatsapp", web::post().to(send_alert));
}
