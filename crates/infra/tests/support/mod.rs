//! Shared helpers for `lexintake-infra` integration tests.
//!
//! Builds real adapters pointed at a `wiremock` server so the workflow can
//! be exercised over HTTP without reaching Google or Telegram.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use lexintake_core::FixedClock;
use lexintake_infra::integrations::calendar::StaticTokenProvider;
use lexintake_infra::{GoogleCalendarClient, HttpClient, TelegramNotifier};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BOT_TOKEN: &str = "123:ABC";
pub const CHAT_ID: &str = "-100200";
pub const EVENTS_PATH: &str = "/calendars/primary/events";
pub const SEND_PATH: &str = "/bot123:ABC/sendMessage";

/// Transport with fast backoff so retry paths stay quick.
pub fn http() -> HttpClient {
    HttpClient::builder()
        .max_attempts(2)
        .base_backoff(Duration::from_millis(5))
        .build()
        .expect("http client")
}

pub fn calendar(server: &MockServer) -> GoogleCalendarClient {
    GoogleCalendarClient::new(http(), Box::new(StaticTokenProvider::new("test-token")))
        .with_base_url(server.uri())
}

pub fn telegram(server: &MockServer) -> TelegramNotifier {
    TelegramNotifier::new(http(), &server.uri(), BOT_TOKEN)
}

/// Clock frozen at 01/05/2025 09:00 local.
pub fn reference_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(utc(2025, 5, 1, 12)))
}

pub fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).single().expect("valid time")
}

pub fn event_json(id: &str, start: &str, end: &str) -> Value {
    json!({
        "id": id,
        "status": "confirmed",
        "summary": format!("Atendimento Jurídico - {id}"),
        "start": { "dateTime": start },
        "end": { "dateTime": end },
        "htmlLink": format!("https://calendar.google.com/event?eid={id}")
    })
}

pub async fn mount_listing(server: &MockServer, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": items })))
        .mount(server)
        .await;
}

pub async fn mount_telegram_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(server)
        .await;
}

/// Requests the server received for `request_path`.
pub async fn received(server: &MockServer, request_path: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == request_path)
        .collect()
}
