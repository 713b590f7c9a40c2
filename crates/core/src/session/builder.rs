use std::time::Duration;

use support_chat_model::{GenerationConfig, ModelProvider};

use super::Session;
use crate::responder::Responder;
use crate::selector::RuleTable;

/// How long the typing indicator is shown before a reply, at minimum.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(1500);

/// [`Session`] builder.
pub struct SessionBuilder {
    pub(crate) responder: Responder,
    pub(crate) typing_delay: Duration,
    pub(crate) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl SessionBuilder {
    /// Creates a builder for a session that answers from the rule table
    /// only.
    #[inline]
    pub fn offline() -> Self {
        Self::with_responder(Responder::offline(RuleTable::default()))
    }

    /// Creates a builder for a session that asks the model provider first.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self::with_responder(Responder::with_model_provider(
            provider,
            RuleTable::default(),
        ))
    }

    /// Creates a builder around a preconfigured responder.
    #[inline]
    pub fn with_responder(responder: Responder) -> Self {
        Self {
            responder,
            typing_delay: DEFAULT_TYPING_DELAY,
            on_idle: None,
        }
    }

    /// Sets the system instructions sent to the model.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.responder = self.responder.with_system_prompt(prompt);
        self
    }

    /// Sets the rule table used for offline replies.
    #[inline]
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.responder = self.responder.with_rules(rules);
        self
    }

    /// Sets the sampling parameters sent to the model.
    #[inline]
    pub fn with_generation_config(
        mut self,
        generation: GenerationConfig,
    ) -> Self {
        self.responder = self.responder.with_generation_config(generation);
        self
    }

    /// Sets the minimum time between a submission and its reply.
    #[inline]
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    /// Attaches a callback to be invoked when a reply has been appended
    /// and the session is idle again.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the session and spawns its task.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    #[inline]
    pub fn build(self) -> Session {
        Session::spawn_from_builder(self)
    }
}
