//! Pure text utilities: time expressions, contact data, reply markers

pub mod confirmation;
pub mod contact;
pub mod redact;
pub mod time_parser;
