//! Event payload parsing

use serde::Deserialize;

use crate::error::Result;
use crate::models::EventMessage;

#[derive(Debug, Deserialize)]
struct EventBatch {
    #[serde(default)]
    events: Vec<EventEnvelope>,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    message: EventMessage,
}

/// Decode an event-poll response body into the messages it carries.
///
/// A missing or empty `events` array yields an empty vec. Any element
/// whose `message` sub-object fails to decode fails the whole batch; there
/// is no partial-success mode.
pub fn parse_event_messages(raw: &[u8]) -> Result<Vec<EventMessage>> {
    let batch: EventBatch = serde_json::from_slice(raw)?;
    Ok(batch.events.into_iter().map(|event| event.message).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_events() {
        let messages = parse_event_messages(br#"{"events":[]}"#).unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_parse_missing_events_key() {
        let messages = parse_event_messages(br#"{"result":"success"}"#).unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_parse_message_batch() {
        let raw = br#"{
            "result": "success",
            "events": [
                {
                    "id": 1,
                    "type": "message",
                    "message": {
                        "content": "hello",
                        "display_recipient": "general",
                        "sender_email": "ann@example.com",
                        "subject": "t1",
                        "type": "stream"
                    }
                },
                {
                    "id": 2,
                    "type": "message",
                    "message": {
                        "content": "psst",
                        "display_recipient": [{"email": "ann@example.com", "id": 7}],
                        "sender_email": "ann@example.com",
                        "subject": "",
                        "type": "private"
                    }
                }
            ]
        }"#;

        let messages = parse_event_messages(raw).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[0].display_recipient.topic(), "general");
        assert_eq!(messages[1].display_recipient.users().len(), 1);
    }

    #[test]
    fn test_parse_event_without_message_fails() {
        let raw = br#"{"events":[{"id":1,"type":"heartbeat"}]}"#;
        assert!(parse_event_messages(raw).is_err());
    }

    #[test]
    fn test_parse_malformed_message_discards_batch() {
        // First element is fine; the second one poisons the whole batch
        let raw = br#"{
            "events": [
                {"id": 1, "message": {"content": "ok", "display_recipient": "general"}},
                {"id": 2, "message": {"content": "bad", "display_recipient": 42}}
            ]
        }"#;
        assert!(parse_event_messages(raw).is_err());
    }

    #[test]
    fn test_parse_truncated_body_fails() {
        assert!(parse_event_messages(br#"{"events":["#).is_err());
    }
}
