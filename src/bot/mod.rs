//! Message routing and reply logic
//!
//! [`Bot`] validates outbound messages, decides between the stream and
//! private send paths, and derives reply targets from inbound events.

use reqwest::Method;

use crate::api::{ApiRequest, ApiResponse, ApiTransport};
use crate::error::{BotError, Result};
use crate::models::{EventMessage, Message};

/// A bot identity bound to a transport.
pub struct Bot {
    email: String,
    transport: Box<dyn ApiTransport>,
}

impl Bot {
    /// Create a bot that sends through the given transport. `email` is the
    /// bot's own address, used to exclude itself from reply recipients.
    pub fn new(email: impl Into<String>, transport: Box<dyn ApiTransport>) -> Self {
        Self {
            email: email.into(),
            transport,
        }
    }

    /// Post a message. If any emails are set on the message it is routed
    /// to [`Bot::send_private`]; otherwise it goes to a stream.
    pub async fn send(&self, message: &Message) -> Result<ApiResponse> {
        if message.content.is_empty() {
            return Err(BotError::EmptyContent);
        }

        // any emails set means this is a private message
        if !message.emails.is_empty() {
            return self.send_private(message).await;
        }

        if message.stream.is_empty() {
            return Err(BotError::EmptyStream);
        }
        if message.topic.is_empty() {
            return Err(BotError::EmptyTopic);
        }
        self.transport.execute(message_request(message)).await
    }

    /// Send a message to the users in the message's email list.
    pub async fn send_private(&self, message: &Message) -> Result<ApiResponse> {
        if message.emails.is_empty() {
            return Err(BotError::NoRecipients);
        }
        self.transport.execute(message_request(message)).await
    }

    /// Reply into whatever context an event message came from: the same
    /// stream and topic, or privately to the other participants.
    pub async fn respond(&self, event: &EventMessage, response: &str) -> Result<ApiResponse> {
        if response.is_empty() {
            return Err(BotError::EmptyReply);
        }

        let mut message = Message {
            stream: event.display_recipient.topic().to_string(),
            topic: event.subject.clone(),
            content: response.to_string(),
            ..Default::default()
        };
        if !message.topic.is_empty() {
            return self.send(&message).await;
        }
        // private message
        if message.stream.is_empty() {
            message.emails = self.reply_recipients(event)?;
            return self.send(&message).await;
        }
        Err(BotError::UnrecognizedEvent(Box::new(event.clone())))
    }

    /// Emails of the other participants in a private conversation.
    fn reply_recipients(&self, event: &EventMessage) -> Result<Vec<String>> {
        let emails: Vec<String> = event
            .display_recipient
            .users()
            .iter()
            .filter(|user| user.email != self.email)
            .map(|user| user.email.clone())
            .collect();
        if emails.is_empty() {
            return Err(BotError::RecipientNotFound);
        }
        Ok(emails)
    }
}

/// Build the form-encoded request that posts a message.
fn message_request(message: &Message) -> ApiRequest {
    let kind = if message.emails.is_empty() {
        "stream"
    } else {
        "private"
    };
    let to = if message.emails.is_empty() {
        message.stream.clone()
    } else {
        message.emails.join(", ")
    };

    let mut form = vec![
        ("type".to_string(), kind.to_string()),
        ("to".to_string(), to),
        ("content".to_string(), message.content.clone()),
    ];
    if kind == "stream" {
        form.push(("subject".to_string(), message.topic.clone()));
    }

    ApiRequest {
        method: Method::POST,
        path: "messages".to_string(),
        form,
    }
}
