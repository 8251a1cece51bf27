//! Next free slot search

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use lexintake_domain::constants::DEFAULT_SEARCH_OFFSET_MINUTES;
use lexintake_domain::{AppointmentSlot, BusinessCalendarWindow, SchedulingError};
use tracing::debug;

use super::conflict::ConflictChecker;

/// Scans forward across business days and hours for the first free slot.
///
/// Candidates are visited earliest day first, then earliest hour, so the
/// first free one is also the earliest.
#[derive(Clone)]
pub struct NextSlotFinder {
    checker: ConflictChecker,
    window: BusinessCalendarWindow,
}

impl NextSlotFinder {
    pub fn new(checker: ConflictChecker, window: BusinessCalendarWindow) -> Self {
        Self { checker, window }
    }

    /// Search starting half an hour after `now`.
    pub async fn find_next(&self, now: DateTime<Utc>) -> Result<AppointmentSlot, SchedulingError> {
        let from = (now + Duration::minutes(DEFAULT_SEARCH_OFFSET_MINUTES))
            .with_timezone(&self.window.timezone);
        self.find_from(from).await
    }

    /// Search from `from` (rounded down to the hour) for at most
    /// `search_horizon_days` calendar days.
    ///
    /// # Errors
    /// - [`SchedulingError::NoSlotAvailable`] when the horizon is exhausted
    /// - [`SchedulingError::CalendarUnavailable`] as soon as one read fails
    pub async fn find_from<Z: TimeZone>(
        &self,
        from: DateTime<Z>,
    ) -> Result<AppointmentSlot, SchedulingError> {
        let start = floor_to_hour(from.with_timezone(&self.window.timezone));
        let first_day = start.date_naive();
        let mut checked = 0usize;

        for offset in 0..i64::from(self.window.search_horizon_days) {
            let day = first_day + Duration::days(offset);
            if !self.window.allows_weekday(day.weekday()) {
                continue;
            }

            for hour in self.window.start_hour..self.window.end_hour {
                let Some(candidate) = day
                    .and_hms_opt(hour, 0, 0)
                    .and_then(|naive| self.window.timezone.from_local_datetime(&naive).single())
                else {
                    continue;
                };
                if candidate < start {
                    continue;
                }

                let slot = AppointmentSlot::starting_at(candidate);
                checked += 1;
                if !self.checker.has_conflict(&slot).await? {
                    debug!(slot = %slot.display_text(), checked, "Found free slot");
                    return Ok(slot);
                }
            }
        }

        debug!(checked, horizon_days = self.window.search_horizon_days, "No free slot in horizon");
        Err(SchedulingError::NoSlotAvailable)
    }
}

fn floor_to_hour(instant: DateTime<Tz>) -> DateTime<Tz> {
    instant
        .with_minute(0)
        .and_then(|value| value.with_second(0))
        .and_then(|value| value.with_nanosecond(0))
        .unwrap_or(instant)
}

/// First whole hour at or after `instant`.
pub(crate) fn ceil_to_hour(instant: DateTime<Tz>) -> DateTime<Tz> {
    let floored = floor_to_hour(instant);
    if floored == instant {
        instant
    } else {
        floored + Duration::hours(1)
    }
}
