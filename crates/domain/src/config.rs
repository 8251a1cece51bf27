//! Configuration management

use chrono::{Duration, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BUSINESS_END_HOUR, DEFAULT_BUSINESS_START_HOUR, DEFAULT_CALENDAR_ID,
    DEFAULT_SEARCH_HORIZON_DAYS, REMINDER_CRON, REMINDER_LEAD_SECS, REMINDER_LOOKAHEAD_MINUTES,
    REMINDER_TOLERANCE_SECS, SLOT_DURATION_MINUTES,
};
use crate::errors::{IntakeError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub firm: FirmConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub telegram: Option<TelegramConfig>,
    #[serde(default)]
    pub email: Option<EmailConfig>,
    #[serde(default)]
    pub openai: Option<OpenAiConfig>,
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Reject configurations the scheduling engine cannot honour.
    pub fn validate(&self) -> Result<()> {
        self.scheduling.window.validate()?;
        if self.scheduling.calendar_id.trim().is_empty() {
            return Err(IntakeError::Config("scheduling.calendar_id must not be empty".into()));
        }
        if self.reminders.tolerance_secs < 0 || self.reminders.lead_secs <= 0 {
            return Err(IntakeError::Config(
                "reminders.lead_secs must be positive and tolerance_secs non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Law firm identity shown to visitors and used in prompts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmConfig {
    pub display_name: String,
    pub practice_areas: Vec<String>,
    /// Self-service booking page appended to replies that offer scheduling.
    pub scheduling_link: Option<String>,
    /// Fallback contact offered when the visitor declines to book.
    pub contact_phone: Option<String>,
}

impl Default for FirmConfig {
    fn default() -> Self {
        Self {
            display_name: "Escritório de Advocacia".to_string(),
            practice_areas: vec![
                "Direito Civil".to_string(),
                "Direito Contratual".to_string(),
                "Direito do Consumidor".to_string(),
                "Responsabilidade Civil".to_string(),
                "Assessoria Empresarial".to_string(),
            ],
            scheduling_link: None,
            contact_phone: None,
        }
    }
}

/// Scheduling engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    pub calendar_id: String,
    /// Staff address invited to every appointment.
    pub attendee_email: Option<String>,
    /// Hold one lock across read-then-write so concurrent attempts cannot
    /// double-book a slot.
    #[serde(default)]
    pub serialize_writes: bool,
    /// Book the suggested slot once without asking the client again.
    #[serde(default = "default_true")]
    pub auto_accept_suggestion: bool,
    #[serde(default)]
    pub window: BusinessCalendarWindow,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            attendee_email: None,
            serialize_writes: false,
            auto_accept_suggestion: true,
            window: BusinessCalendarWindow::default(),
        }
    }
}

/// Allowed weekdays and hours for appointments, read-only for the process
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCalendarWindow {
    pub weekdays: Vec<Weekday>,
    /// First bookable hour (inclusive).
    pub start_hour: u32,
    /// Hour at which bookings stop (exclusive).
    pub end_hour: u32,
    pub timezone: Tz,
    pub search_horizon_days: u32,
}

impl Default for BusinessCalendarWindow {
    fn default() -> Self {
        Self {
            weekdays: vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
            start_hour: DEFAULT_BUSINESS_START_HOUR,
            end_hour: DEFAULT_BUSINESS_END_HOUR,
            timezone: chrono_tz::America::Sao_Paulo,
            search_horizon_days: DEFAULT_SEARCH_HORIZON_DAYS,
        }
    }
}

impl BusinessCalendarWindow {
    pub fn allows_weekday(&self, weekday: Weekday) -> bool {
        self.weekdays.contains(&weekday)
    }

    /// Fixed appointment length.
    pub fn slot_duration(&self) -> Duration {
        Duration::minutes(SLOT_DURATION_MINUTES)
    }

    pub fn validate(&self) -> Result<()> {
        if self.weekdays.is_empty() {
            return Err(IntakeError::Config("business weekdays must not be empty".into()));
        }
        if self.end_hour > 24 || self.start_hour >= self.end_hour {
            return Err(IntakeError::Config(format!(
                "invalid business hours: {}..{}",
                self.start_hour, self.end_hour
            )));
        }
        if self.search_horizon_days == 0 {
            return Err(IntakeError::Config("search_horizon_days must be positive".into()));
        }
        Ok(())
    }
}

/// Calendar API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub api_base_url: String,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    /// Cached OAuth credential file holding the access token.
    pub token_path: Option<String>,
    pub request_timeout_secs: u64,
    pub max_attempts: usize,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.googleapis.com/calendar/v3".to_string(),
            access_token: None,
            token_path: Some("token.json".to_string()),
            request_timeout_secs: 30,
            max_attempts: 3,
        }
    }
}

/// Telegram bot used for staff notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(skip_serializing)]
    pub bot_token: String,
    pub chat_id: String,
    #[serde(default = "default_telegram_api")]
    pub api_base_url: String,
}

/// SMTP settings for confirmation and reminder emails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    /// Staff mailbox receiving notifications; defaults to `username`.
    pub recipient: Option<String>,
}

impl EmailConfig {
    pub fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(&self.username)
    }
}

/// Language-model API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

/// Reminder sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    pub enabled: bool,
    pub cron_expression: String,
    pub lookahead_minutes: i64,
    /// Target lead time before the event start.
    pub lead_secs: i64,
    /// Accepted deviation around `lead_secs`.
    pub tolerance_secs: i64,
    pub job_timeout_secs: u64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cron_expression: REMINDER_CRON.to_string(),
            lookahead_minutes: REMINDER_LOOKAHEAD_MINUTES,
            lead_secs: REMINDER_LEAD_SECS,
            tolerance_secs: REMINDER_TOLERANCE_SECS,
            job_timeout_secs: 120,
        }
    }
}

/// Append-only log locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub appointment_log_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { appointment_log_path: "agendamentos.jsonl".to_string() }
    }
}

fn default_true() -> bool {
    true
}

fn default_telegram_api() -> String {
    "https://api.telegram.org".to_string()
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    465
}

fn default_openai_model() -> String {
    "gpt-4-turbo".to_string()
}
