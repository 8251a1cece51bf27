//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Scheduling
pub const SLOT_DURATION_MINUTES: i64 = 60;
pub const DEFAULT_SEARCH_OFFSET_MINUTES: i64 = 30;
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";
pub const DEFAULT_BUSINESS_START_HOUR: u32 = 9;
pub const DEFAULT_BUSINESS_END_HOUR: u32 = 18;
pub const DEFAULT_SEARCH_HORIZON_DAYS: u32 = 15;
pub const DEFAULT_CALENDAR_ID: &str = "primary";

/// Terms that bypass normal scheduling and ask for immediate human contact.
pub const URGENCY_KEYWORDS: &[&str] = &["urgência", "urgente", "imediato", "agora", "o quanto antes"];

/// Filler phrases stripped from a preferred-time expression before matching.
pub const TIME_FILLER_PHRASES: &[&str] = &["às", "da manhã", "da tarde"];

// Calendar event content
pub const EVENT_SUMMARY_PREFIX: &str = "Atendimento Jurídico";
pub const URGENT_TIME_LABEL: &str = "URGENTE - contato imediato";
pub const PHONE_NOT_INFORMED: &str = "Não informado";

// Conversation
pub const CONFIRMATION_MARKER: &str = "[ATENDIMENTO CONFIRMADO]";
pub const SCHEDULING_CUE: &str = "agendar";
pub const INTENT_UNKNOWN: &str = "Não identificado";
pub const INTENT_TEMPERATURE: f32 = 0.0;
pub const REPLY_TEMPERATURE: f32 = 0.2;

// Reminders
pub const REMINDER_LOOKAHEAD_MINUTES: i64 = 65;
pub const REMINDER_LEAD_SECS: i64 = 3600;
pub const REMINDER_TOLERANCE_SECS: i64 = 60;
pub const REMINDER_CRON: &str = "0 */15 * * * *";
