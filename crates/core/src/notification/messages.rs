//! Staff-facing notification texts.
//!
//! Bodies use Telegram Markdown (`*bold*`); email channels send them as
//! plain text.

use lexintake_domain::constants::URGENT_TIME_LABEL;
use lexintake_domain::{
    AppointmentRequest, AppointmentSlot, CalendarEvent, ChatMessage, ChatRole, NotificationMessage,
};

/// A client asked for immediate contact instead of a calendar slot.
pub fn urgent_notice(request: &AppointmentRequest) -> NotificationMessage {
    NotificationMessage::new(
        format!("URGENTE: Atendimento Jurídico - {}", request.client_name),
        booking_body(request, URGENT_TIME_LABEL, None),
    )
}

/// An appointment was committed to the calendar.
pub fn confirmation_notice(
    request: &AppointmentRequest,
    slot: &AppointmentSlot,
    link: &str,
) -> NotificationMessage {
    NotificationMessage::new(
        format!("Confirmação de Atendimento Jurídico - {}", request.client_name),
        booking_body(request, &slot.confirmation_text(), Some(link)),
    )
}

fn booking_body(request: &AppointmentRequest, time_label: &str, link: Option<&str>) -> String {
    let mut body = format!(
        "\u{1F4DD} *Novo atendimento agendado*\nCliente: {}\nTelefone: {}\nHorário: {}\nResumo: {}",
        request.client_name, request.phone, time_label, request.details
    );
    if let Some(link) = link.filter(|link| !link.is_empty()) {
        body.push_str(&format!("\n\u{1F517} Ver no Google Calendar: {link}"));
    }
    body
}

/// Visible conversation so far, sent once contact data is complete.
pub fn transcript_notice<'a>(
    client_name: Option<&str>,
    messages: impl IntoIterator<Item = &'a ChatMessage>,
) -> NotificationMessage {
    let mut body = String::from("\u{1F4CB} *Novo Atendimento*\n\n");
    for message in messages {
        let author = match message.role {
            ChatRole::User => "\u{1F464}",
            ChatRole::Assistant => "\u{1F916}",
            ChatRole::System => continue,
        };
        body.push_str(&format!("{author}: {}\n", message.content));
    }
    NotificationMessage::new(
        format!("Novo atendimento - {}", client_name.unwrap_or("visitante")),
        body,
    )
}

/// An event starts in about one hour.
pub fn reminder_notice(event: &CalendarEvent) -> NotificationMessage {
    let name = event.summary.as_deref().unwrap_or("Reunião");
    let start = event
        .start
        .map(|start| start.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default();
    let link = event.html_link.as_deref().unwrap_or("#");

    let mut body = format!("\u{1F514} *Lembrete de Reunião*\nEvento: {name}\nInício: {start}\n");
    if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
        body.push_str(&format!("Detalhes: {description}\n"));
    }
    body.push_str(&format!("\u{1F517} [Ver no Google Calendar]({link})"));

    NotificationMessage::new(format!("Lembrete: Reunião - {name}"), body)
}
