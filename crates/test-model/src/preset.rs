use serde::{Deserialize, Serialize};
use support_chat_model::ErrorKind;

/// The preset outcome of one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// The request succeeds with this candidate text.
    #[serde(rename = "text")]
    Text(String),
    /// The request succeeds, but the text hit the token limit.
    #[serde(rename = "truncated")]
    Truncated(String),
    /// The request fails with an error of this kind.
    #[serde(rename = "failure")]
    Failure(ErrorKind),
}

impl PresetReply {
    /// Creates a successful reply.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Text(text.into())
    }

    /// Creates a successful reply that stopped at the token limit.
    #[inline]
    pub fn truncated<S: Into<String>>(text: S) -> Self {
        Self::Truncated(text.into())
    }

    /// Creates a failed reply simulating a transport error.
    #[inline]
    pub fn transport_failure() -> Self {
        Self::Failure(ErrorKind::Transport)
    }

    /// Creates a failed reply simulating an unexpected payload shape.
    #[inline]
    pub fn malformed_payload() -> Self {
        Self::Failure(ErrorKind::MalformedPayload)
    }
}
