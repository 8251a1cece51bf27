//! Shared fakes for `lexintake-app` integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::America::Sao_Paulo;
use chrono_tz::Tz;
use lexintake_core::{CalendarClient, FixedClock, LanguageModel, NotificationDispatcher, Notifier};
use lexintake_domain::{
    CalendarEvent, ChatMessage, Config, EventStatus, IntakeError, NewCalendarEvent,
    NotificationMessage, Result as DomainResult,
};
use lexintake_lib::AppContext;

pub const STAFF_CHAT: &str = "-100200";

/// Local business-time instant in 2025.
pub fn local(month: u32, day: u32, hour: u32) -> DateTime<Tz> {
    Sao_Paulo.with_ymd_and_hms(2025, month, day, hour, 0, 0).single().expect("valid local time")
}

pub fn utc(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, hour, minute, 0).single().expect("valid time")
}

/// Calendar kept in memory; every insert gets a fake `htmlLink`.
#[derive(Default, Clone)]
pub struct MemoryCalendar {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
}

impl MemoryCalendar {
    pub fn with_busy(self, start: DateTime<Tz>, summary: &str) -> Self {
        {
            let mut events = self.events.lock().unwrap();
            let id = format!("seed-{}", events.len());
            events.push(CalendarEvent {
                id,
                summary: Some(summary.into()),
                description: Some("Consulta inicial".into()),
                status: EventStatus::Confirmed,
                start: Some(start.fixed_offset()),
                end: Some((start + Duration::hours(1)).fixed_offset()),
                html_link: Some("https://calendar.test/seed".into()),
                attendees: vec![],
            });
        }
        self
    }

    pub fn created(&self) -> Vec<CalendarEvent> {
        let events = self.events.lock().unwrap();
        events.iter().filter(|event| event.id.starts_with("created-")).cloned().collect()
    }
}

#[async_trait]
impl CalendarClient for MemoryCalendar {
    async fn list_events(
        &self,
        _calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> DomainResult<Vec<CalendarEvent>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| match (event.start, event.end) {
                (Some(start), Some(end)) => start < time_max && end > time_min,
                _ => false,
            })
            .cloned()
            .collect())
    }

    async fn insert_event(
        &self,
        _calendar_id: &str,
        event: &NewCalendarEvent,
    ) -> DomainResult<CalendarEvent> {
        let mut events = self.events.lock().unwrap();
        let id = format!("created-{}", events.len());
        let stored = CalendarEvent {
            html_link: Some(format!("https://calendar.test/event?eid={id}")),
            id,
            summary: Some(event.summary.clone()),
            description: Some(event.description.clone()),
            status: EventStatus::Confirmed,
            start: Some(event.slot.start().fixed_offset()),
            end: Some(event.slot.end().fixed_offset()),
            attendees: event.attendees.clone(),
        };
        events.push(stored.clone());
        Ok(stored)
    }
}

/// Notifier that records every message it is asked to deliver.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, NotificationMessage)>>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, NotificationMessage)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel(&self) -> &'static str {
        "recording"
    }

    async fn notify(&self, recipient: &str, message: &NotificationMessage) -> DomainResult<()> {
        self.sent.lock().unwrap().push((recipient.to_string(), message.clone()));
        Ok(())
    }
}

/// Language model answering from a fixed queue.
pub struct ScriptedModel {
    answers: Mutex<VecDeque<String>>,
}

impl ScriptedModel {
    pub fn new(answers: &[&str]) -> Self {
        Self { answers: Mutex::new(answers.iter().map(|answer| answer.to_string()).collect()) }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, _history: &[ChatMessage], _temperature: f32) -> DomainResult<String> {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| IntakeError::Network("model offline".into()))
    }
}

/// Configuration writing the appointment log under `dir`.
pub fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.storage.appointment_log_path =
        dir.join("agendamentos.jsonl").to_string_lossy().into_owned();
    config
}

/// Context around in-memory collaborators with the clock at `now`.
pub fn context(
    config: Config,
    calendar: MemoryCalendar,
    notifier: RecordingNotifier,
    model: Option<ScriptedModel>,
    now: DateTime<Utc>,
) -> AppContext {
    let notifications = NotificationDispatcher::new().with_target(Arc::new(notifier), STAFF_CHAT);
    AppContext::with_collaborators(
        config,
        Arc::new(calendar),
        notifications,
        model.map(|model| Arc::new(model) as Arc<dyn LanguageModel>),
        Arc::new(FixedClock::new(now)),
    )
}
