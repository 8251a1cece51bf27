//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use lexintake_core::{
    CalendarClient, Clock, IntakeAssistant, IntakeService, LanguageModel, NotificationDispatcher,
    ReminderService, SchedulingService, SystemClock,
};
use lexintake_domain::{Config, Result};
use lexintake_infra::config::load as load_config;
use lexintake_infra::{
    GoogleCalendarClient, HttpClient, JsonlAppointmentLog, OpenAIClient, ReminderScheduler,
    ReminderSchedulerConfig, TelegramNotifier,
};
use tracing::{info, warn};

/// Completions can take a while; allow more than the default HTTP timeout.
const LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub calendar: Arc<dyn CalendarClient>,
    pub notifications: Arc<NotificationDispatcher>,
    pub scheduling: Arc<SchedulingService>,
    pub appointment_log: Arc<JsonlAppointmentLog>,
    pub intake: Arc<IntakeService>,
    /// Present only when an OpenAI key is configured.
    pub assistant: Option<Arc<IntakeAssistant>>,
    pub reminders: Arc<ReminderService>,
}

impl AppContext {
    /// Load configuration from the environment and files, then build every
    /// adapter it enables.
    pub fn new() -> Result<Self> {
        let config = load_config()?;
        Self::from_config(config)
    }

    /// Build the production adapters for `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let calendar: Arc<dyn CalendarClient> =
            Arc::new(GoogleCalendarClient::from_config(&config.calendar)?);
        let notifications = notification_channels(&config)?;
        let model = match &config.openai {
            Some(openai) => {
                let http = HttpClient::builder().timeout(LLM_TIMEOUT).build()?;
                Some(Arc::new(OpenAIClient::from_config(openai, http)) as Arc<dyn LanguageModel>)
            }
            None => None,
        };

        Ok(Self::with_collaborators(config, calendar, notifications, model, Arc::new(SystemClock)))
    }

    /// Wire the services around already-built collaborators.
    pub fn with_collaborators(
        config: Config,
        calendar: Arc<dyn CalendarClient>,
        notifications: NotificationDispatcher,
        model: Option<Arc<dyn LanguageModel>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let notifications = Arc::new(notifications);
        let scheduling = Arc::new(
            SchedulingService::from_config(calendar.clone(), &config.scheduling)
                .with_clock(clock.clone()),
        );
        let appointment_log =
            Arc::new(JsonlAppointmentLog::new(&config.storage.appointment_log_path));
        let intake = Arc::new(
            IntakeService::new(scheduling.clone(), notifications.clone(), appointment_log.clone())
                .with_clock(clock.clone())
                .with_auto_accept_suggestion(config.scheduling.auto_accept_suggestion),
        );
        let assistant = model.map(|model| {
            Arc::new(IntakeAssistant::new(model, notifications.clone(), config.firm.clone()))
        });
        let reminders = Arc::new(ReminderService::new(
            calendar.clone(),
            notifications.clone(),
            config.scheduling.calendar_id.clone(),
            &config.reminders,
        ));

        info!(
            calendar_id = %config.scheduling.calendar_id,
            channels = ?notifications.channels(),
            assistant = assistant.is_some(),
            "Application context initialised"
        );

        Self {
            config,
            clock,
            calendar,
            notifications,
            scheduling,
            appointment_log,
            intake,
            assistant,
            reminders,
        }
    }

    /// Cron scheduler running the reminder sweep with the configured timing.
    pub fn reminder_scheduler(&self) -> ReminderScheduler {
        ReminderScheduler::with_config(
            ReminderSchedulerConfig::from(&self.config.reminders),
            self.reminders.clone(),
            self.clock.clone(),
        )
    }
}

fn notification_channels(config: &Config) -> Result<NotificationDispatcher> {
    let mut dispatcher = NotificationDispatcher::new();

    if let Some(telegram) = &config.telegram {
        let notifier = TelegramNotifier::from_config(telegram, HttpClient::new()?);
        dispatcher = dispatcher.with_target(Arc::new(notifier), telegram.chat_id.clone());
    }

    #[cfg(feature = "email")]
    if let Some(email) = &config.email {
        let notifier = lexintake_infra::SmtpEmailNotifier::from_config(email)?;
        dispatcher = dispatcher.with_target(Arc::new(notifier), email.recipient());
    }

    #[cfg(not(feature = "email"))]
    if config.email.is_some() {
        warn!("SMTP settings found but this build has no `email` feature; email disabled");
    }

    if dispatcher.is_empty() {
        warn!("No staff notification channel configured");
    }
    Ok(dispatcher)
}
