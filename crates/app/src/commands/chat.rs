use std::io::Write;

use lexintake_core::{BookingOutcome, IntakeAssistant, IntakeService};
use lexintake_domain::has_confirmation_marker;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use super::schedule::render_outcome;

/// Lines that end the session.
const EXIT_WORDS: [&str; 3] = ["sair", "exit", "quit"];

/// Line-based conversation with the intake assistant.
///
/// Every reply carrying a confirmation marker is booked immediately; the
/// outcomes are printed after the reply. Returns every booking made during
/// the session.
pub async fn run_chat<R, W>(
    assistant: &IntakeAssistant,
    intake: &IntakeService,
    input: R,
    out: &mut W,
) -> anyhow::Result<Vec<BookingOutcome>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut context = assistant.start_conversation();
    let mut bookings = Vec::new();
    let mut lines = input.lines();

    writeln!(out, "{}", assistant.greeting())?;

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if EXIT_WORDS.iter().any(|word| text.eq_ignore_ascii_case(word)) {
            break;
        }

        let (next, reply) = assistant.respond(context, text).await;
        context = next;
        writeln!(out, "{reply}")?;

        if has_confirmation_marker(&reply) {
            let outcomes = intake.book_from_reply(&context.history, &reply).await;
            for outcome in &outcomes {
                writeln!(out, "{}", render_outcome(outcome))?;
            }
            bookings.extend(outcomes);
        }
        debug!(stage = ?context.stage, turns = context.history.len(), "Turn processed");
    }

    info!(bookings = bookings.len(), "Chat session ended");
    Ok(bookings)
}
