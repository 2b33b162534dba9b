//! Bot client for the Zulip chat API
//!
//! Posts stream and private messages as a bot identity and decodes
//! inbound event payloads into typed message structures.

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod events;
pub mod models;

pub use api::{ApiRequest, ApiResponse, ApiTransport, EventQueue, ZulipClient};
pub use bot::Bot;
pub use error::{BotError, Result};
pub use events::parse_event_messages;
pub use models::{DisplayRecipient, EventMessage, Message, User};
