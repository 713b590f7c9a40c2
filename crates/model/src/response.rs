use serde::{Deserialize, Serialize};

/// A complete response from the model provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Text of the first candidate.
    pub text: String,
    /// Why the model stopped generating, if reported.
    pub finish_reason: Option<ModelFinishReason>,
}

/// The reason why a model response has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFinishReason {
    /// The model has finished generating text.
    Stop,
    /// The output hit the token limit.
    MaxTokens,
    /// The output was cut by a safety filter.
    Safety,
    /// Any reason this crate doesn't model.
    Other,
}
