//! Append-only appointment log stored as JSON lines

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lexintake_core::AppointmentLog;
use lexintake_domain::{AppointmentRecord, Result};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::InfraError;

/// One JSON object per line, appended in booking order.
pub struct JsonlAppointmentLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlAppointmentLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record back, skipping lines that no longer parse.
    ///
    /// A missing file is an empty log.
    pub async fn read_all(&self) -> Result<Vec<AppointmentRecord>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(InfraError::from(err).into()),
        };

        let records = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str(line) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(line = index + 1, error = %err, "Skipping malformed appointment record");
                    None
                }
            })
            .collect();
        Ok(records)
    }
}

#[async_trait]
impl AppointmentLog for JsonlAppointmentLog {
    async fn append(&self, record: &AppointmentRecord) -> Result<()> {
        let json = serde_json::to_string(record).map_err(InfraError::from)?;
        let line = format!("{}\n", json);

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(InfraError::from)?;
        file.write_all(line.as_bytes()).await.map_err(InfraError::from)?;
        file.flush().await.map_err(InfraError::from)?;

        debug!(path = %self.path.display(), status = %record.status, "Appointment recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use lexintake_domain::{AppointmentStatus, IntakeError};
    use tempfile::TempDir;

    use super::*;

    fn record(name: &str, status: AppointmentStatus) -> AppointmentRecord {
        AppointmentRecord {
            recorded_at: Utc.with_ymd_and_hms(2025, 5, 12, 13, 0, 0).unwrap(),
            client_name: name.to_string(),
            details: "Revisão contratual".to_string(),
            scheduled_for: "12/05/2025 10:00".to_string(),
            status,
        }
    }

    #[tokio::test]
    async fn appends_one_line_per_record() {
        let dir = TempDir::new().expect("temp dir");
        let log = JsonlAppointmentLog::new(dir.path().join("agendamentos.jsonl"));

        log.append(&record("Maria Souza", AppointmentStatus::Success)).await.expect("append");
        log.append(&record("Pedro Alves", AppointmentStatus::Failure)).await.expect("append");

        let raw = tokio::fs::read_to_string(log.path()).await.expect("read");
        assert_eq!(raw.lines().count(), 2);

        let records = log.read_all().await.expect("records");
        assert_eq!(records[0].client_name, "Maria Souza");
        assert_eq!(records[1].status, AppointmentStatus::Failure);
    }

    #[tokio::test]
    async fn concurrent_appends_keep_lines_intact() {
        let dir = TempDir::new().expect("temp dir");
        let log = Arc::new(JsonlAppointmentLog::new(dir.path().join("log.jsonl")));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    log.append(&record(&format!("Cliente {i}"), AppointmentStatus::Success)).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.expect("join").expect("append");
        }

        assert_eq!(log.read_all().await.expect("records").len(), 16);
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().expect("temp dir");
        let log = JsonlAppointmentLog::new(dir.path().join("absent.jsonl"));
        assert!(log.read_all().await.expect("records").is_empty());
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("log.jsonl");
        tokio::fs::write(&path, "not json\n").await.expect("seed");

        let log = JsonlAppointmentLog::new(&path);
        log.append(&record("Maria Souza", AppointmentStatus::Success)).await.expect("append");

        assert_eq!(log.read_all().await.expect("records").len(), 1);
    }

    #[tokio::test]
    async fn unwritable_location_is_storage_error() {
        let dir = TempDir::new().expect("temp dir");
        let log = JsonlAppointmentLog::new(dir.path().join("missing-dir").join("log.jsonl"));

        let result = log.append(&record("Maria Souza", AppointmentStatus::Success)).await;
        assert!(matches!(result, Err(IntakeError::NotFound(_) | IntakeError::Storage(_))));
    }
}
