use actix_web::{web, HttpRequest, HttpResponse};

use crate::config::InboundConfig;
use crate::error::{AppError, AppResult};
use crate::models::{MessageEvent, RelayParams};
use crate::routes::{body_limit, read_body, MessageResponse};
use crate::services::EventRelay;

/// POST /wassenger/webhook?token=...&account=...
/// Relays Wassenger message events to Slack
pub async fn receive_events(
    relay: web::Data<EventRelay>,
    inbound: Option<web::Data<InboundConfig>>,
    req: HttpRequest,
    payload: web::Payload,
) -> AppResult<HttpResponse> {
    let params = web::Query::<RelayParams>::from_query(req.query_string())
        .map_err(|e| {
            log::error!("Request params not match: {}", e);
            AppError::Validation(format!("Invalid query parameters: {}", e))
        })?
        .into_inner();

    // The body stays unread until the request is authenticated
    let account = relay.authenticate(&params)?;

    let body = read_body(payload, body_limit(inbound)).await?;

    let events: Vec<MessageEvent> = serde_json::from_slice(&body).map_err(|e| {
        log::error!("Request body not match: {}", e);
        AppError::Validation(format!("Invalid event JSON: {}", e))
    })?;

    log::info!(
        "Request body: {}",
        serde_json::to_string(&events).unwrap_or_default()
    );

    relay.relay(account, &events).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Notification to Slack sent",
    }))
}

/// Configures the Wassenger webhook route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/wassenger/webhook", web::post().to(receive_events));
}
