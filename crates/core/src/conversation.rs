//! Conversation-related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing into the widget.
    User,
    /// The support assistant.
    Assistant,
}

/// A message in the transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Author of the message.
    pub role: Role,
    /// Plain text content, possibly with light markdown.
    pub content: String,
    /// When the message was appended.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a user message stamped with the current time.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message stamped with the current time.
    #[inline]
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(Role::Assistant, content)
    }

    #[inline]
    fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered message history of one session.
///
/// Messages can only be appended, or dropped all at once with
/// [`Transcript::clear`].
#[derive(Clone, Default, Debug)]
pub struct Transcript {
    items: Vec<Message>,
}

/// One record in an exported transcript.
#[derive(Serialize)]
struct ExportRecord<'a> {
    role: Role,
    content: &'a str,
}

impl Transcript {
    /// Appends a message.
    #[inline]
    pub fn push(&mut self, message: Message) {
        self.items.push(message);
    }

    /// Drops every message.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the messages, oldest first.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.items
    }

    /// Serializes the transcript as a pretty-printed JSON array of
    /// `{"role", "content"}` records in insertion order.
    ///
    /// Timestamps are not part of the export.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        let records: Vec<_> = self
            .items
            .iter()
            .map(|msg| ExportRecord {
                role: msg.role,
                content: &msg.content,
            })
            .collect();
        serde_json::to_string_pretty(&records)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn test_export_preserves_order() {
        let mut transcript = Transcript::default();
        transcript.push(Message::user("hello"));
        transcript.push(Message::assistant("Hello! Welcome to Resezy."));
        transcript.push(Message::user("pricing?"));

        let exported = transcript.export_json().unwrap();
        let value: Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(
            value,
            json!([
                { "role": "user", "content": "hello" },
                { "role": "assistant", "content": "Hello! Welcome to Resezy." },
                { "role": "user", "content": "pricing?" },
            ])
        );
    }

    #[test]
    fn test_export_empty() {
        let transcript = Transcript::default();
        assert_eq!(transcript.export_json().unwrap(), "[]");
    }

    #[test]
    fn test_clear() {
        let mut transcript = Transcript::default();
        transcript.push(Message::user("hi"));
        assert_eq!(transcript.len(), 1);
        transcript.clear();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_message_serde() {
        let msg = Message::assistant("Thanks!");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "assistant");
        let back: Message = serde_json::from_value(value).unwrap();
        assert_eq!(back, msg);
    }
}
