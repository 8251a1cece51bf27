use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use lexintake_core::CalendarClient;
use lexintake_domain::{
    CalendarEvent, EventStatus, IntakeError, NewCalendarEvent, Result as DomainResult,
};

/// In-memory `CalendarClient` fake.
///
/// Keeps every event in a shared vector and counts reads and writes so tests
/// can assert how many calendar calls an operation made. An optional read
/// delay widens the gap between "check" and "insert" to make
/// read-then-write races observable.
#[derive(Default, Clone)]
pub struct InMemoryCalendar {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
    read_delay: Option<StdDuration>,
    unavailable: bool,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every read fails as if the provider were down.
    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    /// Sleep after taking the read snapshot.
    pub fn with_read_delay(mut self, delay: StdDuration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    /// Seed an hour-long event.
    pub fn with_event(self, start: DateTime<Tz>, status: EventStatus) -> Self {
        {
            let mut events = self.events.lock().unwrap();
            let id = format!("seed-{}", events.len());
            events.push(CalendarEvent {
                id,
                summary: Some("Reunião interna".into()),
                description: None,
                status,
                start: Some(start.fixed_offset()),
                end: Some((start + Duration::hours(1)).fixed_offset()),
                html_link: Some("https://calendar.test/seed".into()),
                attendees: vec![],
            });
        }
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Events created through `insert_event`.
    pub fn created(&self) -> Vec<CalendarEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.id.starts_with("created-"))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CalendarClient for InMemoryCalendar {
    async fn list_events(
        &self,
        _calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> DomainResult<Vec<CalendarEvent>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(IntakeError::Network("connection refused".into()));
        }

        let snapshot: Vec<CalendarEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| match (event.start, event.end) {
                (Some(start), Some(end)) => start < time_max && end > time_min,
                _ => false,
            })
            .cloned()
            .collect();

        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(snapshot)
    }

    async fn insert_event(
        &self,
        _calendar_id: &str,
        event: &NewCalendarEvent,
    ) -> DomainResult<CalendarEvent> {
        self.writes.fetch_add(1, Ordering::SeqCst);
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
