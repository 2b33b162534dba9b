//! Message-related models

use serde::Deserialize;

use super::DisplayRecipient;

/// An outbound message. Either a stream message, where `stream` and
/// `topic` are set, or a private message, where `emails` has at least one
/// recipient.
///
/// If `emails` is non-empty, send routing always treats the message as
/// private.
#[derive(Debug, Clone, Default)]
pub struct Message {
    pub stream: String,
    pub topic: String,
    pub emails: Vec<String>,
    pub content: String,
}

/// One inbound chat message, lifted out of its event envelope.
///
/// Field names match the wire format exactly; fields the server omits
/// decode as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventMessage {
    pub avatar_url: String,
    pub client: String,
    pub content: String,
    pub content_type: String,
    pub display_recipient: DisplayRecipient,
    pub gravatar_hash: String,
    pub id: i64,
    pub recipient_id: i64,
    pub sender_domain: String,
    pub sender_email: String,
    pub sender_full_name: String,
    pub sender_id: i64,
    pub sender_short_name: String,
    pub subject: String,
    pub subject_links: Vec<serde_json::Value>,
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub message_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_stream_event_message() {
        let raw = r#"{
            "avatar_url": "https://example.com/avatar.png",
            "client": "website",
            "content": "hello there",
            "content_type": "text/x-markdown",
            "display_recipient": "general",
            "gravatar_hash": "abc123",
            "id": 12345,
            "recipient_id": 20,
            "sender_domain": "example.com",
            "sender_email": "ann@example.com",
            "sender_full_name": "Ann Example",
            "sender_id": 7,
            "sender_short_name": "ann",
            "subject": "greetings",
            "subject_links": [],
            "timestamp": 1400000000,
            "type": "stream"
        }"#;

        let message: EventMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(message.id, 12345);
        assert_eq!(message.sender_email, "ann@example.com");
        assert_eq!(message.subject, "greetings");
        assert_eq!(message.message_type, "stream");
        assert_eq!(message.display_recipient.topic(), "general");
        assert!(message.display_recipient.users().is_empty());
    }

    #[test]
    fn test_decode_private_event_message() {
        let raw = r#"{
            "content": "psst",
            "display_recipient": [
                {"email": "bot@example.com", "full_name": "Bot", "id": 1},
                {"email": "ann@example.com", "full_name": "Ann", "id": 7}
            ],
            "sender_email": "ann@example.com",
            "subject": "",
            "type": "private"
        }"#;

        let message: EventMessage = serde_json::from_str(raw).unwrap();
        assert_eq!(message.message_type, "private");
        assert_eq!(message.display_recipient.topic(), "");
        assert_eq!(message.display_recipient.users().len(), 2);
        assert_eq!(message.display_recipient.users()[1].email, "ann@example.com");
        // Omitted fields fall back to empty values
        assert_eq!(message.avatar_url, "");
        assert_eq!(message.timestamp, 0);
    }
}
