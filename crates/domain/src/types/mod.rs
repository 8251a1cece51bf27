//! Domain types and models

pub mod calendar;
pub mod intake;
pub mod scheduling;

pub use calendar::{CalendarEvent, EventStatus, NewCalendarEvent};
pub use intake::{
    AppointmentRecord, AppointmentStatus, BookingRequest, ChatMessage, ChatRole, ClientData,
    ConversationContext, IntakeStage, NotificationMessage,
};
pub use scheduling::{AppointmentRequest, AppointmentSlot, SchedulingResult};
