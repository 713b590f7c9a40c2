use support_chat_model::{
    ErrorKind, GenerationConfig, ModelFinishReason, ModelMessage,
    ModelProvider, ModelRequest,
};

use crate::model_client::ModelClient;
use crate::selector::RuleTable;

/// Product briefing sent along with every remote request.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("./system_prompt.md");

/// Why a reply came from the offline selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// No model provider is configured.
    NoCredential,
    /// The round trip failed before a payload could be read.
    Transport,
    /// The payload was read but had no usable candidate text.
    MalformedPayload,
}

impl From<ErrorKind> for FallbackReason {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        if kind.is_transport() {
            FallbackReason::Transport
        } else {
            FallbackReason::MalformedPayload
        }
    }
}

/// Where a reply came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReplySource {
    /// The remote model answered.
    Remote,
    /// The rule table answered.
    Offline(FallbackReason),
}

/// An assistant reply, ready to be appended to a transcript.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reply {
    /// Text of the reply.
    pub text: String,
    /// Where the text came from.
    pub source: ReplySource,
}

/// Produces exactly one reply for every user message.
///
/// With a model provider attached, the responder asks the remote model
/// first and falls back to the rule table on any failure. Without one, it
/// always answers from the rule table. Failures are logged and never
/// returned.
#[derive(Clone, Debug)]
pub struct Responder {
    model_client: Option<ModelClient>,
    system_prompt: String,
    generation: GenerationConfig,
    rules: RuleTable,
}

impl Responder {
    /// Creates a responder that only uses the rule table.
    #[inline]
    pub fn offline(rules: RuleTable) -> Self {
        Self {
            model_client: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.trim_end().to_owned(),
            generation: GenerationConfig::default(),
            rules,
        }
    }

    /// Creates a responder that asks the model provider first.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
        rules: RuleTable,
    ) -> Self {
        Self {
            model_client: Some(ModelClient::new(provider)),
            ..Self::offline(rules)
        }
    }

    /// Replaces the system instructions.
    #[inline]
    pub fn with_system_prompt<S: Into<String>>(mut self, prompt: S) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Replaces the offline rule table.
    #[inline]
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    /// Replaces the sampling parameters.
    #[inline]
    pub fn with_generation_config(
        mut self,
        generation: GenerationConfig,
    ) -> Self {
        self.generation = generation;
        self
    }

    /// Returns `true` if a remote model will be tried.
    #[inline]
    pub fn has_credential(&self) -> bool {
        self.model_client.is_some()
    }

    /// Returns the system instructions.
    #[inline]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Produces the reply for a user message.
    pub async fn respond(&self, message: &str) -> Reply {
        let Some(model_client) = &self.model_client else {
            return self.offline_reply(message, FallbackReason::NoCredential);
        };

        let req = ModelRequest {
            system: Some(self.system_prompt.clone()),
            messages: vec![ModelMessage::User(message.to_owned())],
            generation: self.generation,
        };
        match model_client.send_request(req).await {
            Ok(resp) if !resp.text.trim().is_empty() => {
                match resp.finish_reason {
                    Some(
                        reason @ (ModelFinishReason::MaxTokens
                        | ModelFinishReason::Safety),
                    ) => warn!("remote reply was cut short: {reason:?}"),
                    reason => debug!("remote reply finished: {reason:?}"),
                }
                Reply {
                    text: resp.text,
                    source: ReplySource::Remote,
                }
            }
            Ok(_) => {
                warn!("remote reply has no text, using offline reply");
                self.offline_reply(message, FallbackReason::MalformedPayload)
            }
            Err(err) => {
                let reason = FallbackReason::from(err.kind());
                warn!("remote reply failed ({reason:?}): {err}");
                self.offline_reply(message, reason)
            }
        }
    }

    /// Produces the rule table reply for a user message.
    pub(crate) fn offline_reply(
        &self,
        message: &str,
        reason: FallbackReason,
    ) -> Reply {
        let rule = self.rules.find(message);
        debug!(
            "offline reply for topic {:?} ({reason:?})",
            rule.map(|rule| rule.topic)
        );
        let text = rule.map_or(self.rules.fallback(), |rule| rule.template);
        Reply {
            text: text.to_owned(),
            source: ReplySource::Offline(reason),
        }
    }
}
