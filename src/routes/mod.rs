pub mod health;
pub mod wassenger;
pub mod whatsapp;

use actix_web::web;
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::Serialize;

use crate::config::InboundConfig;
use crate::error::{AppError, AppResult};

/// Fixed acknowledgment returned by the webhook endpoints
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Body size limit from the registered [`InboundConfig`], or the default
pub(crate) fn body_limit(inbound: Option<web::Data<InboundConfig>>) -> usize {
    inbound
        .map(|c| c.max_body_bytes)
        .unwrap_or_else(|| InboundConfig::default().max_body_bytes)
}

/// Buffers the request body, failing once it grows past `limit` bytes
pub(crate) async fn read_body(mut payload: web::Payload, limit: usize) -> AppResult<BytesMut> {
    let mut body = BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            log::error!("Failed to read request body: {}", e);
            AppError::Validation(format!("Failed to read request body: {}", e))
        })?;

        if body.len() + chunk.len() > limit {
            log::error!("Request body exceeds {} bytes", limit);
            return Err(AppError::Validation(format!(
                "Request body exceeds {} bytes",
                limit
            )));
        }

        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
