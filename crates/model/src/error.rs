use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request never produced a usable HTTP response.
    Transport,
    /// The response body doesn't have the expected shape.
    MalformedPayload,
    /// The response is well-formed but carries no candidate text.
    EmptyResponse,
    /// The content is moderated.
    Moderated,
    /// The model provider is rate limited.
    RateLimitExceeded,
    /// Any other errors.
    Other,
}

impl ErrorKind {
    /// Returns `true` if the error happened before a response payload
    /// could be inspected.
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorKind::Transport
                | ErrorKind::RateLimitExceeded
                | ErrorKind::Other
        )
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "Transport error"),
            ErrorKind::MalformedPayload => write!(f, "Malformed payload"),
            ErrorKind::EmptyResponse => write!(f, "Empty response"),
            ErrorKind::Moderated => write!(f, "Moderated"),
            ErrorKind::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            ErrorKind::Other => write!(f, "Other error"),
        }
    }
}
