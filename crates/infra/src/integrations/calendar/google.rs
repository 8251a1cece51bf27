//! Google Calendar v3 adapter

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use lexintake_core::CalendarClient;
use lexintake_domain::{
    CalendarConfig, CalendarEvent, EventStatus, IntakeError, NewCalendarEvent, Result,
};
use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::auth::{token_provider_from_config, AccessTokenProvider};
use crate::http::HttpClient;

/// Upper bound on result pages followed for one listing.
const MAX_PAGES: usize = 10;

/// Calendar adapter speaking the Google Calendar REST API.
pub struct GoogleCalendarClient {
    http: HttpClient,
    base_url: String,
    tokens: Box<dyn AccessTokenProvider>,
}

impl GoogleCalendarClient {
    pub fn new(http: HttpClient, tokens: Box<dyn AccessTokenProvider>) -> Self {
        Self { http, base_url: CalendarConfig::default().api_base_url, tokens }
    }

    /// Point the client at another API root (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the client, its HTTP transport and token source from config.
    pub fn from_config(config: &CalendarConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .max_attempts(config.max_attempts)
            .build()?;
        let tokens = token_provider_from_config(config)?;
        Ok(Self::new(http, tokens).with_base_url(config.api_base_url.clone()))
    }

    fn events_url(&self, calendar_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| IntakeError::Config(format!("invalid calendar API URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| IntakeError::Config("calendar API URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["calendars", calendar_id, "events"]);
        Ok(url)
    }
}

#[async_trait]
impl CalendarClient for GoogleCalendarClient {
    #[instrument(skip(self))]
    async fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>> {
        let url = self.events_url(calendar_id)?;
        let token = self.tokens.access_token().await?;
        let mut events = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut query = vec![
                ("timeMin", time_min.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("timeMax", time_max.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ];
            if let Some(page) = page_token.take() {
                query.push(("pageToken", page));
            }

            let request =
                self.http.request(Method::GET, url.clone()).bearer_auth(&token).query(&query);
            let page: GoogleEventsResponse = self.http.send_json(request).await?;

            events.extend(page.items.into_iter().map(GoogleEvent::into_domain));
            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        if page_token.is_some() {
            warn!(fetched = events.len(), "Calendar listing truncated after page limit");
        }
        debug!(count = events.len(), "Listed calendar events");
        Ok(events)
    }

    #[instrument(skip(self, event), fields(start = %event.slot.display_text()))]
    async fn insert_event(
        &self,
        calendar_id: &str,
        event: &NewCalendarEvent,
    ) -> Result<CalendarEvent> {
        let url = self.events_url(calendar_id)?;
        let token = self.tokens.access_token().await?;
        let body = InsertEventBody::from(event);

        let request = self.http.request(Method::POST, url).bearer_auth(&token).json(&body);
        let created: GoogleEvent = self.http.send_json(request).await?;

        debug!(event_id = %created.id, "Created calendar event");
        Ok(created.into_domain())
    }
}

#[derive(Debug, Deserialize)]
struct GoogleEventsResponse {
    #[serde(default)]
    items: Vec<GoogleEvent>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleEvent {
    id: String,
    status: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    start: Option<EventDateTime>,
    end: Option<EventDateTime>,
    #[serde(rename = "htmlLink")]
    html_link: Option<String>,
    #[serde(default)]
    attendees: Vec<GoogleAttendee>,
}

#[derive(Debug, Deserialize)]
struct EventDateTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
struct GoogleAttendee {
    #[serde(default)]
    email: String,
}

impl GoogleEvent {
    fn into_domain(self) -> CalendarEvent {
        // Unknown statuses keep blocking their slot.
        let status = self
            .status
            .as_deref()
            .and_then(|raw| EventStatus::from_str(raw).ok())
            .unwrap_or(EventStatus::Confirmed);
        let start = parse_timed(self.start.as_ref(), &self.id);
        let end = parse_timed(self.end.as_ref(), &self.id);

        CalendarEvent {
            id: self.id,
            summary: self.summary,
            description: self.description,
            status,
            start,
            end,
            html_link: self.html_link,
            attendees: self
                .attendees
                .into_iter()
                .map(|attendee| attendee.email)
                .filter(|email| !email.trim().is_empty())
                .collect(),
        }
    }
}

/// All-day events only carry `date`; those have no timed start.
fn parse_timed(value: Option<&EventDateTime>, event_id: &str) -> Option<DateTime<FixedOffset>> {
    let raw = value?.date_time.as_deref()?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(event_id, raw, error = %err, "Unparseable event time");
            None
        }
    }
}

#[derive(Debug, Serialize)]
struct InsertEventBody<'a> {
    summary: &'a str,
    description: &'a str,
    start: EventTimeBody,
    end: EventTimeBody,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attendees: Vec<GoogleAttendee>,
}

#[derive(Debug, Serialize)]
struct EventTimeBody {
    #[serde(rename = "dateTime")]
    date_time: String,
    #[serde(rename = "timeZone")]
    time_zone: &'static str,
}

impl<'a> From<&'a NewCalendarEvent> for InsertEventBody<'a> {
    fn from(event: &'a NewCalendarEvent) -> Self {
        let time_zone = event.timezone_name();
        Self {
            summary: &event.summary,
            description: &event.description,
            start: EventTimeBody {
                date_time: event.slot.start().fixed_offset().to_rfc3339(),
                time_zone,
            },
            end: EventTimeBody { date_time: event.slot.end().fixed_offset().to_rfc3339(), time_zone },
            attendees: event
                .attendees
                .iter()
                .map(|email| GoogleAttendee { email: email.clone() })
                .collect(),
        }
    }
}
