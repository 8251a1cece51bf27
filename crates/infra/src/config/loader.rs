//! Configuration loader
//!
//! Loads application configuration from a config file and environment
//! variables.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file from the working directory when present
//! 2. Starts from a probed config file, or from defaults when none exists
//! 3. Overlays environment variables on top of the file values
//! 4. Validates the merged result
//!
//! ## Environment Variables
//! - `LEXINTAKE_FIRM_NAME`: Firm display name
//! - `LEXINTAKE_CONTACT_PHONE`: Fallback contact phone offered to visitors
//! - `LINK_CALENDAR`: Self-service scheduling page
//! - `LEXINTAKE_CALENDAR_ID`: Calendar to read and book on
//! - `LEXINTAKE_ATTENDEE_EMAIL`: Staff address invited to every appointment
//! - `LEXINTAKE_SERIALIZE_WRITES`: Hold a lock across read-then-write
//! - `LEXINTAKE_AUTO_ACCEPT_SUGGESTION`: Book a suggested slot without asking
//! - `LEXINTAKE_CALENDAR_TOKEN`: Calendar API bearer token
//! - `LEXINTAKE_CALENDAR_TOKEN_PATH`: Cached OAuth credential file
//! - `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`: Staff Telegram chat
//! - `SMTP_USER` / `SMTP_PASS` / `EMAIL_DEST`: Staff email notifications
//! - `SMTP_HOST` / `SMTP_PORT`: SMTP relay (defaults to Gmail over TLS)
//! - `OPENAI_API_KEY` / `LEXINTAKE_OPENAI_MODEL`: Language model access
//! - `LEXINTAKE_REMINDERS_ENABLED`: Whether the reminder sweep runs
//! - `LEXINTAKE_APPOINTMENT_LOG`: Append-only appointment log path
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./lexintake.json` or `./lexintake.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use lexintake_domain::{
    Config, EmailConfig, IntakeError, OpenAiConfig, Result, TelegramConfig,
};

const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 465;
const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo";

/// Load configuration with the full fallback strategy
///
/// # Errors
/// Returns `IntakeError::Config` if:
/// - A probed config file cannot be parsed
/// - An environment variable holds an invalid value
/// - The merged configuration fails validation
pub fn load() -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    let base = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, starting from defaults");
            Config::default()
        }
    };

    let config = apply_env(base)?;
    config.validate()?;
    tracing::info!(
        calendar_id = %config.scheduling.calendar_id,
        telegram = config.telegram.is_some(),
        email = config.email.is_some(),
        openai = config.openai.is_some(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Load configuration from environment variables on top of defaults
///
/// # Errors
/// Returns `IntakeError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    apply_env(Config::default())
}

/// Overlay environment variables onto an existing configuration
///
/// Variables that are not set leave the corresponding value untouched.
/// Notification channels and the language model are only enabled when their
/// credentials are complete.
///
/// # Errors
/// Returns `IntakeError::Config` if a variable has an invalid value.
pub fn apply_env(mut config: Config) -> Result<Config> {
    if let Some(name) = env_opt("LEXINTAKE_FIRM_NAME") {
        config.firm.display_name = name;
    }
    if let Some(phone) = env_opt("LEXINTAKE_CONTACT_PHONE") {
        config.firm.contact_phone = Some(phone);
    }
    if let Some(link) = env_opt("LINK_CALENDAR") {
        config.firm.scheduling_link = Some(link);
    }

    if let Some(calendar_id) = env_opt("LEXINTAKE_CALENDAR_ID") {
        config.scheduling.calendar_id = calendar_id;
    }
    if let Some(attendee) = env_opt("LEXINTAKE_ATTENDEE_EMAIL") {
        config.scheduling.attendee_email = Some(attendee);
    }
    config.scheduling.serialize_writes =
        env_bool("LEXINTAKE_SERIALIZE_WRITES", config.scheduling.serialize_writes);
    config.scheduling.auto_accept_suggestion =
        env_bool("LEXINTAKE_AUTO_ACCEPT_SUGGESTION", config.scheduling.auto_accept_suggestion);

    if let Some(token) = env_opt("LEXINTAKE_CALENDAR_TOKEN") {
        config.calendar.access_token = Some(token);
    }
    if let Some(path) = env_opt("LEXINTAKE_CALENDAR_TOKEN_PATH") {
        config.calendar.token_path = Some(path);
    }

    if let (Some(bot_token), Some(chat_id)) =
        (env_opt("TELEGRAM_BOT_TOKEN"), env_opt("TELEGRAM_CHAT_ID"))
    {
        let api_base_url = config
            .telegram
            .take()
            .map_or_else(|| DEFAULT_TELEGRAM_API.to_string(), |existing| existing.api_base_url);
        config.telegram = Some(TelegramConfig { bot_token, chat_id, api_base_url });
    }

    if let (Some(username), Some(password)) = (env_opt("SMTP_USER"), env_opt("SMTP_PASS")) {
        let existing = config.email.take();
        let smtp_host = env_opt("SMTP_HOST")
            .or_else(|| existing.as_ref().map(|email| email.smtp_host.clone()))
            .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());
        let smtp_port = match env_opt("SMTP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| IntakeError::Config(format!("Invalid SMTP port: {}", e)))?,
            None => existing.as_ref().map_or(DEFAULT_SMTP_PORT, |email| email.smtp_port),
        };
        let recipient =
            env_opt("EMAIL_DEST").or_else(|| existing.and_then(|email| email.recipient));
        config.email = Some(EmailConfig { smtp_host, smtp_port, username, password, recipient });
    }

    if let Some(api_key) = env_opt("OPENAI_API_KEY") {
        let model = env_opt("LEXINTAKE_OPENAI_MODEL")
            .or_else(|| config.openai.as_ref().map(|openai| openai.model.clone()))
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
        config.openai = Some(OpenAiConfig { api_key, model });
    }

    config.reminders.enabled = env_bool("LEXINTAKE_REMINDERS_ENABLED", config.reminders.enabled);
    if let Some(path) = env_opt("LEXINTAKE_APPOINTMENT_LOG") {
        config.storage.appointment_log_path = path;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `IntakeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(IntakeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            IntakeError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| IntakeError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| IntakeError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| IntakeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(IntakeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
        candidates.extend(vec![cwd.join("../config.json"), cwd.join("../config.toml")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    ["config.json", "config.toml", "lexintake.json", "lexintake.toml"]
        .iter()
        .map(|name| dir.join(name))
        .collect()
}

/// Read an optional environment variable, treating blank values as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
