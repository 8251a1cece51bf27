//! Shared test helpers for `lexintake-core` integration tests.
//!
//! These helpers provide an in-memory calendar, recording notification
//! channels and a fixed reference clock so scheduling tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod calendar;
pub mod notifier;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc, Weekday};
use chrono_tz::America::Sao_Paulo;
use chrono_tz::Tz;
use lexintake_core::FixedClock;
use lexintake_domain::BusinessCalendarWindow;

/// Local business-time instant in 2025.
pub fn local(month: u32, day: u32, hour: u32) -> DateTime<Tz> {
    Sao_Paulo.with_ymd_and_hms(2025, month, day, hour, 0, 0).single().expect("valid local time")
}

/// Clock frozen at 01/05/2025 09:00 local.
pub fn reference_clock() -> Arc<FixedClock> {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).single().expect("valid time");
    Arc::new(FixedClock::new(now))
}

/// Default window plus Saturdays.
pub fn window_with_saturday() -> BusinessCalendarWindow {
    let mut window = BusinessCalendarWindow::default();
    window.weekdays.push(Weekday::Sat);
    window
}
