//! Recipient models and the polymorphic display_recipient decode

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::Deserialize;

/// A user referenced by a private-conversation recipient list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct User {
    pub domain: String,
    pub email: String,
    pub full_name: String,
    pub id: i64,
    pub is_mirror_dummy: bool,
    pub short_name: String,
}

/// The `display_recipient` field of an event message.
///
/// The wire value is either a bare string (for a stream message) or a list
/// of users (the participants of a private conversation). No type tag is
/// transmitted, so the decode discriminates on structural shape: string
/// first, then user list.
#[derive(Debug, Clone)]
pub enum DisplayRecipient {
    Topic(String),
    Users(Vec<User>),
}

impl DisplayRecipient {
    /// Topic string; empty when the recipient is a user list.
    pub fn topic(&self) -> &str {
        match self {
            DisplayRecipient::Topic(topic) => topic,
            DisplayRecipient::Users(_) => "",
        }
    }

    /// Private-conversation participants; empty for stream messages.
    pub fn users(&self) -> &[User] {
        match self {
            DisplayRecipient::Topic(_) => &[],
            DisplayRecipient::Users(users) => users,
        }
    }
}

impl Default for DisplayRecipient {
    fn default() -> Self {
        DisplayRecipient::Topic(String::new())
    }
}

impl<'de> Deserialize<'de> for DisplayRecipient {
    fn deserialize<D: de::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct RecipientVisitor;

        impl<'de> Visitor<'de> for RecipientVisitor {
            type Value = DisplayRecipient;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a topic string or a list of users")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(DisplayRecipient::Topic(v.to_string()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut users = Vec::new();
                while let Some(user) = seq.next_element()? {
                    users.push(user);
                }
                Ok(DisplayRecipient::Users(users))
            }
        }

        d.deserialize_any(RecipientVisitor)
    }
}
