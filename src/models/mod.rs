//! Data models for Zulip messages and events

mod message;
mod recipient;

pub use message::*;
pub use recipient::*;
