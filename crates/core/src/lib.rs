//! Core logic of the support chat: the session loop, the responder with its
//! offline rule table, and the HTML rendering adapters.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod conversation;
mod model_client;
pub mod render;
mod responder;
pub mod selector;
mod session;

pub use responder::{
    DEFAULT_SYSTEM_PROMPT, FallbackReason, Reply, ReplySource, Responder,
};
pub use selector::{RuleTable, offline_response};
pub use session::{
    DEFAULT_TYPING_DELAY, ExportError, Session, SessionBuilder,
    SessionClosedError, SessionEvent, SessionStage, SubscriptionId,
};
