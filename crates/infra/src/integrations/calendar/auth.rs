//! Access tokens for the calendar API
//!
//! The OAuth consent flow runs outside this process; the adapter only needs
//! a bearer token, taken either from configuration or from the cached
//! credential file the consent flow leaves behind.

use std::path::PathBuf;

use async_trait::async_trait;
use lexintake_domain::{CalendarConfig, IntakeError, Result};
use serde::Deserialize;

use crate::errors::InfraError;

/// Source of the bearer token sent with every calendar request.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

/// Fixed token supplied through configuration.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Reads the token from a cached OAuth credential file on every call, so a
/// refresh performed by another process is picked up without a restart.
pub struct TokenFileProvider {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CachedCredentials {
    #[serde(alias = "access_token")]
    token: Option<String>,
}

impl TokenFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for TokenFileProvider {
    async fn access_token(&self) -> Result<String> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(InfraError::from)?;
        let credentials: CachedCredentials =
            serde_json::from_str(&contents).map_err(InfraError::from)?;

        credentials.token.filter(|token| !token.trim().is_empty()).ok_or_else(|| {
            IntakeError::Auth(format!("no access token in {}", self.path.display()))
        })
    }
}

/// Pick the token source described by the calendar configuration.
///
/// An explicit token wins over the credential file.
pub fn token_provider_from_config(config: &CalendarConfig) -> Result<Box<dyn AccessTokenProvider>> {
    if let Some(token) = config.access_token.as_deref().filter(|token| !token.is_empty()) {
        return Ok(Box::new(StaticTokenProvider::new(token)));
    }
    if let Some(path) = config.token_path.as_deref() {
        return Ok(Box::new(TokenFileProvider::new(path)));
    }
    Err(IntakeError::Config("calendar needs either access_token or token_path".into()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[tokio::test]
    async fn reads_token_field_from_credential_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"token": "ya29.abc", "refresh_token": "1//xyz"}}"#).expect("write");

        let provider = TokenFileProvider::new(file.path());
        assert_eq!(provider.access_token().await.expect("token"), "ya29.abc");
    }

    #[tokio::test]
    async fn accepts_access_token_alias() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"access_token": "ya29.def"}}"#).expect("write");

        let provider = TokenFileProvider::new(file.path());
        assert_eq!(provider.access_token().await.expect("token"), "ya29.def");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let provider = TokenFileProvider::new("/nonexistent/token.json");
        assert!(matches!(provider.access_token().await, Err(IntakeError::NotFound(_))));
    }

    #[tokio::test]
    async fn blank_token_is_auth_error() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"token": "  "}}"#).expect("write");

        let provider = TokenFileProvider::new(file.path());
        assert!(matches!(provider.access_token().await, Err(IntakeError::Auth(_))));
    }

    #[tokio::test]
    async fn explicit_token_wins_over_file() {
        let config = CalendarConfig {
            access_token: Some("from-config".into()),
            ..CalendarConfig::default()
        };
        let provider = token_provider_from_config(&config).expect("provider");
        assert_eq!(provider.access_token().await.expect("token"), "from-config");
    }

    #[test]
    fn missing_sources_is_config_error() {
        let config =
            CalendarConfig { access_token: None, token_path: None, ..CalendarConfig::default() };
        assert!(matches!(token_provider_from_config(&config), Err(IntakeError::Config(_))));
    }
}
