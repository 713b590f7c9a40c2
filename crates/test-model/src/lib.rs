//! A local fake model for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use support_chat_model::{
    ErrorKind, ModelFinishReason, ModelProvider, ModelProviderError,
    ModelRequest, ModelResponse,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake model for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// model should respond to each request. Replies are consumed in order, one
/// per request. If there are no replies left in the script, an error will be
/// returned.
///
/// Clones share the same script and request log, so a test can keep a clone
/// around to inspect what the session sent.
///
/// # Note
///
/// This type is not optimized for production use, there are heavy memory
/// copies involved. You should only use it for testing.
#[derive(Clone, Default)]
pub struct TestModelProvider {
    script: Arc<Mutex<VecDeque<PresetReply>>>,
    requests: Arc<Mutex<Vec<ModelRequest>>>,
    delay: Option<Duration>,
}

impl TestModelProvider {
    #[inline]
    pub fn add_reply(&mut self, preset: PresetReply) {
        lock(&self.script).push_back(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns all requests received so far.
    #[inline]
    pub fn requests(&self) -> Vec<ModelRequest> {
        lock(&self.requests).clone()
    }

    /// Returns the number of replies that haven't been consumed.
    #[inline]
    pub fn remaining_replies(&self) -> usize {
        lock(&self.script).len()
    }
}

impl ModelProvider for TestModelProvider {
    type Error = crate::Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        lock(&self.requests).push(req.clone());
        let preset = lock(&self.script).pop_front();
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            match preset {
                Some(PresetReply::Text(text)) => Ok(ModelResponse {
                    text,
                    finish_reason: Some(ModelFinishReason::Stop),
                }),
                Some(PresetReply::Truncated(text)) => Ok(ModelResponse {
                    text,
                    finish_reason: Some(ModelFinishReason::MaxTokens),
                }),
                Some(PresetReply::Failure(kind)) => Err(Error {
                    message: "preset failure",
                    kind,
                }),
                None => Err(Error {
                    message: "no enough replies",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}

#[inline]
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
