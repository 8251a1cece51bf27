//! Reminder scheduler for periodic appointment reminders.
//!
//! Provides a cron-based scheduler that triggers the reminder sweep at fixed
//! intervals. Join handles are tracked, cancellation is explicit, and every
//! asynchronous operation is wrapped in a timeout.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lexintake_core::{ReminderService, SystemClock};
//! use lexintake_infra::scheduling::{ReminderScheduler, ReminderSchedulerConfig, SchedulerResult};
//!
//! # async fn example(reminders: Arc<ReminderService>) -> SchedulerResult<()> {
//! let mut scheduler = ReminderScheduler::with_config(
//!     ReminderSchedulerConfig {
//!         cron_expression: "0 */15 * * * *".into(), // every 15 minutes
//!         ..Default::default()
//!     },
//!     reminders,
//!     Arc::new(SystemClock),
//! );
//!
//! scheduler.start().await?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use lexintake_core::{Clock, ReminderService};
use lexintake_domain::constants::REMINDER_CRON;
use lexintake_domain::ReminderConfig;
use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::scheduling::error::{SchedulerError, SchedulerResult};

/// Configuration for the reminder scheduler.
#[derive(Debug, Clone)]
pub struct ReminderSchedulerConfig {
    /// Cron expression (with seconds) describing the execution schedule.
    pub cron_expression: String,
    /// Timeout applied to a single sweep.
    pub job_timeout: Duration,
    /// Timeout for starting the underlying scheduler.
    pub start_timeout: Duration,
    /// Timeout for stopping the scheduler.
    pub stop_timeout: Duration,
    /// Timeout for awaiting the monitor task join handle.
    pub join_timeout: Duration,
}

impl Default for ReminderSchedulerConfig {
    fn default() -> Self {
        Self {
            cron_expression: REMINDER_CRON.into(),
            job_timeout: Duration::from_secs(120),
            start_timeout: Duration::from_secs(5),
            stop_timeout: Duration::from_secs(5),
            join_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&ReminderConfig> for ReminderSchedulerConfig {
    fn from(config: &ReminderConfig) -> Self {
        Self {
            cron_expression: config.cron_expression.clone(),
            job_timeout: Duration::from_secs(config.job_timeout_secs),
            ..Default::default()
        }
    }
}

/// Reminder scheduler with explicit lifecycle management.
pub struct ReminderScheduler {
    scheduler: Option<JobScheduler>,
    config: ReminderSchedulerConfig,
    monitor_handle: Option<JoinHandle<()>>,
    cancellation: CancellationToken,
    reminders: Arc<ReminderService>,
    clock: Arc<dyn Clock>,
}

impl ReminderScheduler {
    /// Create a scheduler with a custom configuration.
    pub fn with_config(
        config: ReminderSchedulerConfig,
        reminders: Arc<ReminderService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            scheduler: None,
            config,
            monitor_handle: None,
            cancellation: CancellationToken::new(),
            reminders,
            clock,
        }
    }

    /// Start the scheduler, spawning the monitoring task.
    #[instrument(skip(self), fields(cron = %self.config.cron_expression))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let scheduler_instance = self.build_scheduler().await?;
        let start_timeout = self.config.start_timeout;

        let start_result = tokio::time::timeout(start_timeout, scheduler_instance.start())
            .await
            .map_err(|source| SchedulerError::Timeout { duration: start_timeout, source })?;

        start_result.map_err(|source| SchedulerError::StartFailed { source })?;

        self.scheduler = Some(scheduler_instance);

        let cancel = self.cancellation.clone();
        let handle = tokio::spawn(async move {
            Self::monitor_task(cancel).await;
        });

        self.monitor_handle = Some(handle);
        info!("Reminder scheduler started");
        Ok(())
    }

    /// Stop the scheduler and wait for the monitor task to finish.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        if !self.is_running() {
            return Err(SchedulerError::NotRunning);
        }

        self.cancellation.cancel();

        let mut scheduler = match self.scheduler.take() {
            Some(scheduler) => scheduler,
            None => return Err(SchedulerError::NotRunning),
        };

        let stop_timeout = self.config.stop_timeout;
        let stop_result =
            tokio::time::timeout(stop_timeout, async move { scheduler.shutdown().await })
                .await
                .map_err(|source| SchedulerError::Timeout { duration: stop_timeout, source })?;

        stop_result.map_err(|source| SchedulerError::StopFailed { source })?;

        if let Some(handle) = self.monitor_handle.take() {
            let join_timeout = self.config.join_timeout;
            tokio::time::timeout(join_timeout, handle)
                .await
                .map_err(|source| SchedulerError::Timeout { duration: join_timeout, source })??;
        }

        info!("Reminder scheduler stopped");
        self.cancellation = CancellationToken::new();
        Ok(())
    }

    /// Returns true when a scheduler instance is active.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    async fn build_scheduler(&self) -> SchedulerResult<JobScheduler> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|source| SchedulerError::CreationFailed { source })?;
        let reminders = self.reminders.clone();
        let clock = self.clock.clone();
        let job_timeout = self.config.job_timeout;

        let job_definition =
            Job::new_async(self.config.cron_expression.as_str(), move |_id, _lock| {
                let reminders = reminders.clone();
                let clock = clock.clone();

                Box::pin(async move {
                    let started = Instant::now();
                    let now = clock.now();

                    match tokio::time::timeout(job_timeout, reminders.sweep(now)).await {
                        Ok(Ok(reminded)) => {
                            debug!(
                                reminded,
                                elapsed_ms = started.elapsed().as_millis() as u64,
                                "Reminder sweep finished successfully"
                            );
                        }
                        Ok(Err(err)) => {
                            error!(error = %err, "Reminder sweep failed");
                        }
                        Err(elapsed) => {
                            warn!(timeout_secs = job_timeout.as_secs(), "Reminder sweep timed out");
                            debug!(elapsed = ?elapsed, "Timeout details");
                        }
                    }
                })
            })
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        let job_id = job_definition.guid();
        scheduler
            .add(job_definition)
            .await
            .map_err(|source| SchedulerError::JobRegistrationFailed { source })?;

        debug!(cron = %self.config.cron_expression, job_id = %job_id, "Registered reminder job");
        Ok(scheduler)
    }

    async fn monitor_task(cancel: CancellationToken) {
        cancel.cancelled().await;
        debug!("Reminder scheduler monitor cancelled");
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        if self.is_running() {
            warn!("ReminderScheduler dropped while running; cancelling tasks");
            self.cancellation.cancel();
        }
    }
}
