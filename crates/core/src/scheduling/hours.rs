//! Business-hours predicate

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use lexintake_domain::BusinessCalendarWindow;

/// Whether `instant` falls on an allowed weekday and inside
/// `[start_hour, end_hour)`, both evaluated in the window's timezone.
pub fn is_business_hour<Z: TimeZone>(window: &BusinessCalendarWindow, instant: &DateTime<Z>) -> bool {
    let local = instant.with_timezone(&window.timezone);
    window.allows_weekday(local.weekday())
        && (window.start_hour..window.end_hour).contains(&local.hour())
}
