//! Error types for the bot client

use thiserror::Error;

use crate::models::EventMessage;

/// Errors returned by the bot client.
///
/// Validation and routing failures are reported before any request is
/// made; transport failures are passed through unchanged.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("message content cannot be empty")]
    EmptyContent,

    #[error("stream cannot be empty")]
    EmptyStream,

    #[error("topic cannot be empty")]
    EmptyTopic,

    #[error("private message must have at least one recipient")]
    NoRecipients,

    #[error("message response cannot be blank")]
    EmptyReply,

    #[error("event had no other users within the display recipient")]
    RecipientNotFound,

    #[error("event message is not understood: {0:?}")]
    UnrecognizedEvent(Box<EventMessage>),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("api error: {0}")]
    Api(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
