//! Intake workflow port definitions

use async_trait::async_trait;
use lexintake_domain::{AppointmentRecord, Result};

/// Append-only record of booked appointments
#[async_trait]
pub trait AppointmentLog: Send + Sync {
    async fn append(&self, record: &AppointmentRecord) -> Result<()>;
}
