//! Notification message extraction.

pub mod decoder;

pub use decoder::{parse_message, ContentFormat, DecodeError};
