//! An abstraction layer for the remote text-generation services the
//! support assistant can talk to.
//!
//! This crate establishes an unified protocol between the chat session
//! and the generative-language backends, so that the session never has to
//! know which backend (if any) produced a reply.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
