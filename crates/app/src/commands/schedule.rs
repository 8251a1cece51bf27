use std::io::Write;

use lexintake_core::BookingOutcome;
use lexintake_domain::constants::PHONE_NOT_INFORMED;
use lexintake_domain::{format_phone, AppointmentRequest, SchedulingResult};
use tracing::instrument;

use crate::AppContext;

/// Book one appointment through the intake workflow and print the outcome.
///
/// `phone` is normalised when it looks like a Brazilian number and kept
/// verbatim otherwise.
#[instrument(skip_all, fields(preferred_time = %preferred_time))]
pub async fn schedule<W: Write>(
    ctx: &AppContext,
    client_name: &str,
    preferred_time: &str,
    details: &str,
    phone: Option<&str>,
    out: &mut W,
) -> anyhow::Result<BookingOutcome> {
    let phone = match phone.map(str::trim).filter(|phone| !phone.is_empty()) {
        Some(raw) => format_phone(raw).unwrap_or_else(|| raw.to_string()),
        None => PHONE_NOT_INFORMED.to_string(),
    };
    let request = AppointmentRequest::new(client_name, preferred_time, details, phone);

    let outcome = ctx.intake.book(&request).await;
    writeln!(out, "{}", render_outcome(&outcome))?;
    Ok(outcome)
}

/// Text shown to the operator for one booking outcome.
pub fn render_outcome(outcome: &BookingOutcome) -> String {
    let mut text = outcome.result.summary();
    if let (Some(slot), SchedulingResult::Confirmed { .. }) = (&outcome.suggested, &outcome.result)
    {
        text.push_str(&format!(
            "\n(requested time was taken; booked the suggested slot {})",
            slot.display_text()
        ));
    }
    if matches!(outcome.result, SchedulingResult::Confirmed { .. } | SchedulingResult::Urgent)
        && !outcome.staff_notified
    {
        text.push_str("\nWarning: no staff channel received the notice.");
    }
    text
}
