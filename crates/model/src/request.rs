/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelRequest {
    /// The system instructions, if any.
    pub system: Option<String>,
    /// The input messages, oldest first.
    pub messages: Vec<ModelMessage>,
    /// Sampling parameters.
    pub generation: GenerationConfig,
}

/// A complete message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelMessage {
    /// A user input text.
    User(String),
}

/// Sampling parameters passed along with a request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationConfig {
    /// Sampling temperature.
    pub temperature: f32,
    /// Top-k sampling cutoff.
    pub top_k: u32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
    /// Upper bound of the generated tokens.
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}
