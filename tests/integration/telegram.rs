//! Integration tests for the Telegram notification sink

use std::time::Duration;

use serde_json::json;
use trendfunnel::config::TelegramConfig;
use trendfunnel::notifications::{NotificationSink, NotifyError, TelegramNotifier};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::{fast_retry, quick_retries};

fn config(server: &MockServer) -> TelegramConfig {
    TelegramConfig {
        base_url: server.uri(),
        bot_token: "123:abc".to_string(),
        chat_id: "42".to_string(),
        bot_name: "Trading Bot".to_string(),
    }
}

fn notifier(server: &MockServer) -> TelegramNotifier {
    TelegramNotifier::new(&config(server), Duration::from_secs(5), fast_retry()).expect("client builds")
}

fn ok_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": {} }))
}

#[tokio::test]
async fn sends_markdown_message_to_chat() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(json!({
            "chat_id": "42",
            "text": "*hello*",
            "parse_mode": "Markdown"
        })))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;

    let notifier = notifier(&server);
    assert!(notifier.is_enabled());
    notifier.send("*hello*").await.unwrap();
}

#[tokio::test]
async fn rejected_message_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "description": "Bad Request: chat not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = notifier(&server).send("hi").await.unwrap_err();
    match err {
        NotifyError::Api(description) => assert!(description.contains("chat not found")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn alerting_send_leaves_notification_flag_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ok_response())
        .mount(&server)
        .await;

    notifier(&server).send("signal").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("disable_notification").is_none());
}

#[tokio::test]
async fn silent_send_disables_notification() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_partial_json(json!({
            "text": "update",
            "disable_notification": true
        })))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;

    notifier(&server).send_silent("update").await.unwrap();
}

#[tokio::test]
async fn timed_out_send_is_retried_up_to_the_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ok_response().set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(&config(&server), Duration::from_millis(100), quick_retries(2))
        .expect("client builds");

    let err = notifier.send("hi").await.unwrap_err();
    assert!(err.is_transient(), "timeout should be transient: {err}");
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}
