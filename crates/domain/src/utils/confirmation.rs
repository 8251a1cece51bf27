//! Booking blocks embedded in assistant replies.
//!
//! The assistant is prompted to close a conversation with one block per
//! booking:
//!
//! ```text
//! [ATENDIMENTO CONFIRMADO] Nome: Ana Lima | Horário: 12/05 às 15h | Detalhes: revisão de contrato
//! ```

use crate::constants::CONFIRMATION_MARKER;
use crate::types::BookingRequest;

/// Extract every well-formed booking block from a reply.
///
/// Blocks without exactly three `|`-separated `label: value` parts are
/// skipped. Text before the first marker is ignored.
pub fn parse_confirmation_blocks(reply: &str) -> Vec<BookingRequest> {
    reply
        .split(CONFIRMATION_MARKER)
        .skip(1)
        .filter(|block| !block.trim().is_empty())
        .filter_map(parse_block)
        .collect()
}

/// Whether the reply contains at least one booking marker.
pub fn has_confirmation_marker(reply: &str) -> bool {
    reply.contains(CONFIRMATION_MARKER)
}

fn parse_block(block: &str) -> Option<BookingRequest> {
    let parts: Vec<&str> = block.trim().split('|').collect();
    let [name, time, details] = parts.as_slice() else {
        return None;
    };

    Some(BookingRequest {
        client_name: field_value(name)?,
        preferred_time: field_value(time)?,
        details: field_value(details)?,
    })
}

fn field_value(part: &str) -> Option<String> {
    let (_, value) = part.split_once(':')?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
