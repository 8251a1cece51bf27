//! End-to-end scheduling scenarios against the in-memory calendar.

mod support;

use std::sync::Arc;
use std::time::Duration;

use lexintake_core::SchedulingService;
use lexintake_domain::{
    AppointmentRequest, BusinessCalendarWindow, EventStatus, ParseError, SchedulingError,
    SchedulingResult,
};
use support::calendar::InMemoryCalendar;
use support::{local, reference_clock, window_with_saturday};

fn service(calendar: &InMemoryCalendar, window: BusinessCalendarWindow) -> SchedulingService {
    SchedulingService::new(Arc::new(calendar.clone()), "primary")
        .with_window(window)
        .with_clock(reference_clock())
        .with_attendee(Some("agenda@escritorio.example".into()))
}

fn request(preferred_time: &str) -> AppointmentRequest {
    AppointmentRequest::new(
        "Rodrigo Moris",
        preferred_time,
        "Consulta sobre planejamento tributário",
        "(11) 98765-4321",
    )
}

#[tokio::test]
async fn free_saturday_slot_is_confirmed_when_window_allows_it() {
    let calendar = InMemoryCalendar::new();
    let result = service(&calendar, window_with_saturday())
        .schedule_appointment(&request("10/05/2025 às 10h"))
        .await;

    let SchedulingResult::Confirmed { slot, link } = result else {
        panic!("expected confirmation, got {result:?}");
    };
    assert_eq!(slot.start(), local(5, 10, 10));
    assert_eq!(slot.end(), local(5, 10, 11));
    assert!(!link.is_empty());

    let created = calendar.created();
    assert_eq!(created.len(), 1);
    assert_eq!(
        created[0].summary.as_deref(),
        Some("Atendimento Jurídico - Rodrigo Moris ((11) 98765-4321)")
    );
    assert_eq!(
        created[0].description.as_deref(),
        Some("Consulta sobre planejamento tributário\n\nTelefone: (11) 98765-4321")
    );
    assert_eq!(created[0].attendees, vec!["agenda@escritorio.example".to_string()]);
}

#[tokio::test]
async fn free_weekday_slot_is_confirmed_with_default_window() {
    let calendar = InMemoryCalendar::new();
    let result = service(&calendar, BusinessCalendarWindow::default())
        .schedule_appointment(&request("12/05/2025 às 10h"))
        .await;

    let SchedulingResult::Confirmed { slot, .. } = result else {
        panic!("expected confirmation, got {result:?}");
    };
    assert_eq!(slot.start(), local(5, 12, 10));
    assert_eq!(slot.confirmation_text(), "12/05/2025 10:00");
    assert_eq!(calendar.writes(), 1);
}

#[tokio::test]
async fn saturday_with_default_window_suggests_monday() {
    let calendar = InMemoryCalendar::new();
    let result = service(&calendar, BusinessCalendarWindow::default())
        .schedule_appointment(&request("10/05/2025 às 10h"))
        .await;

    let SchedulingResult::Suggested { slot } = result else {
        panic!("expected suggestion, got {result:?}");
    };
    assert_eq!(slot.start(), local(5, 12, 9));
    assert_eq!(calendar.writes(), 0);
}

#[tokio::test]
async fn sunday_evening_suggests_next_business_morning() {
    let calendar = InMemoryCalendar::new();
    let result = service(&calendar, BusinessCalendarWindow::default())
        .schedule_appointment(&request("11/05/2025 às 20h"))
        .await;

    assert_eq!(
        result,
        SchedulingResult::Suggested {
            slot: lexintake_domain::AppointmentSlot::starting_at(local(5, 12, 9))
        }
    );
}

#[tokio::test]
async fn missing_year_uses_current_business_year() {
    let calendar = InMemoryCalendar::new();
    let result = service(&calendar, BusinessCalendarWindow::default())
        .schedule_appointment(&request("12/05 às 15h"))
        .await;

    let SchedulingResult::Confirmed { slot, .. } = result else {
        panic!("expected confirmation, got {result:?}");
    };
    assert_eq!(slot.start(), local(5, 12, 15));
}

#[tokio::test]
async fn weekday_names_are_rejected_as_parse_errors() {
    let calendar = InMemoryCalendar::new();
    let result = service(&calendar, BusinessCalendarWindow::default())
        .schedule_appointment(&request("sábado às 11h"))
        .await;

    assert_eq!(result, SchedulingResult::rejected(ParseError::new("sábado às 11h")));
    assert_eq!(calendar.reads(), 0);
}

#[tokio::test]
async fn urgent_request_makes_no_calendar_calls() {
    let calendar = InMemoryCalendar::new();
    let result = service(&calendar, BusinessCalendarWindow::default())
        .schedule_appointment(&request("o quanto antes"))
        .await;

    assert_eq!(result, SchedulingResult::Urgent);
    assert_eq!(calendar.reads(), 0);
    assert_eq!(calendar.writes(), 0);
}

#[tokio::test]
async fn suggestion_text_is_accepted_back() {
    let calendar = InMemoryCalendar::new().with_event(local(5, 12, 10), EventStatus::Confirmed);
    let svc = service(&calendar, BusinessCalendarWindow::default());

    let first = svc.schedule_appointment(&request("12/05/2025 às 10h")).await;
    let SchedulingResult::Suggested { slot } = first else {
        panic!("expected suggestion, got {first:?}");
    };
    assert_eq!(slot.display_text(), "12/05/2025 às 11h");

    let retry = svc.schedule_appointment(&request(&slot.display_text())).await;
    let SchedulingResult::Confirmed { slot: booked, .. } = retry else {
        panic!("expected confirmation, got {retry:?}");
    };
    assert_eq!(booked, slot);
}

#[tokio::test]
async fn tentative_events_block_but_cancelled_do_not() {
    let calendar = InMemoryCalendar::new()
        .with_event(local(5, 13, 10), EventStatus::Tentative)
        .with_event(local(5, 14, 10), EventStatus::Cancelled);
    let svc = service(&calendar, BusinessCalendarWindow::default());

    let tentative = svc.schedule_appointment(&request("13/05/2025 às 10h")).await;
    assert_eq!(tentative.label(), "suggested");

    let cancelled = svc.schedule_appointment(&request("14/05/2025 às 10h")).await;
    assert!(cancelled.is_confirmed());
}

#[tokio::test]
async fn unavailable_calendar_rejects_instead_of_booking() {
    let calendar = InMemoryCalendar::unavailable();
    let result = service(&calendar, BusinessCalendarWindow::default())
        .schedule_appointment(&request("12/05/2025 às 10h"))
        .await;

    let SchedulingResult::Rejected { reason } = result else {
        panic!("expected rejection, got {result:?}");
    };
    assert!(matches!(reason, SchedulingError::CalendarUnavailable(_)));
    assert!(reason.to_string().contains("connection refused"));
    assert_eq!(calendar.writes(), 0);
}

#[tokio::test]
async fn concurrent_attempts_without_serialization_double_book() {
    let calendar = InMemoryCalendar::new().with_read_delay(Duration::from_millis(20));
    let svc = service(&calendar, BusinessCalendarWindow::default());
    let first = request("12/05/2025 às 10h");
    let second = AppointmentRequest::new("Ana Lima", "12/05/2025 às 10h", "Divórcio", "11 91234-5678");

    let (a, b) =
        tokio::join!(svc.schedule_appointment(&first), svc.schedule_appointment(&second));

    // Read-then-write is not atomic: both attempts see a free slot.
    assert!(a.is_confirmed());
    assert!(b.is_confirmed());
    assert_eq!(calendar.writes(), 2);
}

#[tokio::test]
async fn serialized_writes_let_only_one_attempt_confirm() {
    let calendar = InMemoryCalendar::new().with_read_delay(Duration::from_millis(20));
    let svc = service(&calendar, BusinessCalendarWindow::default()).with_serialized_writes(true);
    let first = request("12/05/2025 às 10h");
    let second = AppointmentRequest::new("Ana Lima", "12/05/2025 às 10h", "Divórcio", "11 91234-5678");

    let (a, b) =
        tokio::join!(svc.schedule_appointment(&first), svc.schedule_appointment(&second));

    let confirmed = [&a, &b].iter().filter(|result| result.is_confirmed()).count();
    assert_eq!(confirmed, 1);
    assert_eq!(calendar.writes(), 1);

    let loser = if a.is_confirmed() { b } else { a };
    let SchedulingResult::Suggested { slot } = loser else {
        panic!("expected suggestion for the second attempt, got {loser:?}");
    };
    assert_eq!(slot.start(), local(5, 12, 11));
}
