use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lexintake_core::intake::AppointmentLog;
use lexintake_core::Notifier;
use lexintake_domain::{
    AppointmentRecord, IntakeError, NotificationMessage, Result as DomainResult,
};

/// Notifier that records every message it is asked to deliver.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, NotificationMessage)>>>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records nothing and fails every delivery.
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

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
        if self.failing {
            return Err(IntakeError::Notification("bot blocked".into()));
        }
        self.sent.lock().unwrap().push((recipient.to_string(), message.clone()));
        Ok(())
    }
}

/// Appointment log kept in memory.
#[derive(Default, Clone)]
pub struct MemoryAppointmentLog {
    records: Arc<Mutex<Vec<AppointmentRecord>>>,
}

impl MemoryAppointmentLog {
    pub fn records(&self) -> Vec<AppointmentRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AppointmentLog for MemoryAppointmentLog {
    async fn append(&self, record: &AppointmentRecord) -> DomainResult<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
