//! Integration tests for POST /webhook/whatsapp

use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use webhook_relay::config::{InboundConfig, OutboundConfig};
use webhook_relay::routes;
use webhook_relay::services::{AlertForwarder, OutboundSender};

use crate::common::{alert_json, whatsapp_config, RecordingSender};

fn forwarder(sender: Arc<RecordingSender>) -> web::Data<AlertForwarder> {
    web::Data::new(AlertForwarder::new(
        whatsapp_config(),
        OutboundConfig::default(),
        sender as Arc<dyn OutboundSender>,
    ))
}

// =============================================================================
// Success
// =============================================================================

#[actix_web::test]
async fn test_alert_is_forwarded() {
    let sender = RecordingSender::ok();
    let app = test::init_service(
        App::new()
            .app_data(forwarder(sender.clone()))
            .configure(routes::whatsapp::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook/whatsapp")
        .set_json(alert_json(
            "alerting",
            "p99 above 2s",
            json!([{"metric": "cpu", "value": 95.5, "tags": {}}, {"metric": "mem", "value": 10.0, "tags": {}}]),
        ))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Whatsapp alert sent"}));

    let bodies = sender.bodies();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0]["param"],
        json!(["[Alerting] API latency", "p99 above 2s", "cpu: 95.500000, mem: 10.000000"])
    );
}

#[actix_web::test]
async fn test_downstream_error_status_still_acknowledged() {
    let sender = RecordingSender::with_status(503);
    let app = test::init_service(
        App::new()
            .app_data(forwarder(sender.clone()))
            .configure(routes::whatsapp::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook/whatsapp")
        .set_json(alert_json("ok", "", json!(null)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

// =============================================================================
// Errors
// =============================================================================

#[actix_web::test]
async fn test_malformed_body_returns_422() {
    let sender = RecordingSender::ok();
    let app = test::init_service(
        App::new()
            .app_data(forwarder(sender.clone()))
            .configure(routes::whatsapp::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook/whatsapp")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"title\": ")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Unprocessable entity"}));
    assert!(sender.calls().is_empty());
}

#[actix_web::test]
async fn test_type_mismatch_returns_422() {
    let sender = RecordingSender::ok();
    let app = test::init_service(
        App::new()
            .app_data(forwarder(sender.clone()))
            .configure(routes::whatsapp::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook/whatsapp")
        .set_json(json!({"title": "t", "evalMatches": [{"metric": "cpu", "value": "high"}]}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
    assert!(sender.calls().is_empty());
}

#[actix_web::test]
async fn test_transport_failure_returns_422() {
    let sender = RecordingSender::failing_on(1);
    let app = test::init_service(
        App::new()
            .app_data(forwarder(sender.clone()))
            .configure(routes::whatsapp::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook/whatsapp")
        .set_json(alert_json("alerting", "m", json!([])))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Unprocessable entity"}));
}

#[actix_web::test]
async fn test_value_out_of_range_returns_422() {
    let sender = RecordingSender::ok();
    let app = test::init_service(
        App::new()
            .app_data(forwarder(sender.clone()))
            .configure(routes::whatsapp::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook/whatsapp")
        .set_json(alert_json("alerting", "m", json!([{"metric": "m", "value": 1e40}])))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
    assert!(sender.calls().is_empty());
}

#[actix_web::test]
async fn test_null_scalars_are_forwarded() {
    let sender = RecordingSender::ok();
    let app = test::init_service(
        App::new()
            .app_data(forwarder(sender.clone()))
            .configure(routes::whatsapp::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook/whatsapp")
        .set_json(json!({
            "title": "Disk",
            "state": "alerting",
            "ruleUrl": null,
            "imageUrl": null,
            "message": "full",
            "evalMatches": [{"metric": "disk", "value": 99.0, "tags": null}]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        sender.bodies()[0]["param"],
        json!(["Disk", "full", "disk: 99.000000"])
    );
}

#[actix_web::test]
async fn test_large_alert_is_forwarded() {
    let sender = RecordingSender::ok();
    let app = test::init_service(
        App::new()
            .app_data(forwarder(sender.clone()))
            .configure(routes::whatsapp::configure),
    )
    .await;

    // Well past actix's default 256 KiB payload limit
    let message = "x".repeat(512 * 1024);
    let req = test::TestRequest::post()
        .uri("/webhook/whatsapp")
        .set_json(alert_json("alerting", &message, json!([])))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(sender.calls().len(), 1);
}

#[actix_web::test]
async fn test_body_over_limit_returns_422() {
    let sender = RecordingSender::ok();
    let app = test::init_service(
        App::new()
            .app_data(forwarder(sender.clone()))
            .app_data(web::Data::new(InboundConfig { max_body_bytes: 64 }))
            .configure(routes::whatsapp::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/webhook/whatsapp")
        .set_json(alert_json("alerting", "m", json!([])))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
    assert!(sender.calls().is_empty());
}
