//! In-crate test doubles shared by unit test modules.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use lexintake_domain::{CalendarEvent, EventStatus, IntakeError, NewCalendarEvent, Result};

use crate::calendar_ports::CalendarClient;

#[derive(Default)]
pub(crate) struct StubCalendar {
    events: Mutex<Vec<CalendarEvent>>,
    fail_reads: bool,
    fail_writes: bool,
    block_all: Mutex<bool>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl StubCalendar {
    pub(crate) fn failing() -> Self {
        Self { fail_reads: true, ..Self::default() }
    }

    pub(crate) fn rejecting_writes() -> Self {
        Self { fail_writes: true, ..Self::default() }
    }

    pub(crate) fn add_busy(&self, start: DateTime<Tz>) {
        self.add_event(start, EventStatus::Confirmed);
    }

    pub(crate) fn add_event(&self, start: DateTime<Tz>, status: EventStatus) {
        let mut events = self.events.lock().unwrap();
        let id = format!("seed-{}", events.len());
        events.push(CalendarEvent {
            id,
            summary: Some("Reunião".into()),
            description: None,
            status,
            start: Some(start.fixed_offset()),
            end: Some((start + Duration::hours(1)).fixed_offset()),
            html_link: None,
            attendees: vec![],
        });
    }

    pub(crate) fn block_everything(&self) {
        *self.block_all.lock().unwrap() = true;
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn inserted(&self) -> Vec<CalendarEvent> {
        self.events.lock().unwrap().iter().filter(|e| e.id.starts_with("evt-")).cloned().collect()
    }
}

#[async_trait]
impl CalendarClient for StubCalendar {
    async fn list_events(
        &self,
        _calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(IntakeError::Calendar("503 backend error".into()));
        }
        if *self.block_all.lock().unwrap() {
            return Ok(vec![CalendarEvent {
                id: "wall".into(),
                summary: Some("Bloqueado".into()),
                description: None,
                status: EventStatus::Confirmed,
                start: Some(time_min.fixed_offset()),
                end: Some(time_max.fixed_offset()),
                html_link: None,
                attendees: vec![],
            }]);
        }
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
    ) -> Result<CalendarEvent> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(IntakeError::Calendar("insufficient permissions".into()));
        }
        let mut events = self.events.lock().unwrap();
        let id = format!("evt-{}", events.len());
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
