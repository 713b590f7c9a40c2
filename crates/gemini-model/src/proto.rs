use serde::{Deserialize, Serialize};
use support_chat_model::{
    ErrorKind, ModelFinishReason, ModelMessage, ModelRequest, ModelResponse,
};

use crate::Error;

// ---------------------------
// Types shared in both ways
// ---------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    #[inline]
    fn text(role: &str, text: String) -> Self {
        Self {
            role: Some(role.to_owned()),
            parts: vec![Part { text: Some(text) }],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

// -----------
// Conversions
// -----------

/// Builds the request body.
///
/// The endpoint has no dedicated slot for system instructions on every
/// model, so they are folded into the first user turn as
/// `"<system>\n\nUser: <message>"`.
pub fn create_request(req: &ModelRequest) -> GenerateContentRequest {
    let mut system = req.system.as_deref();
    let mut contents = Vec::with_capacity(req.messages.len().max(1));
    for ModelMessage::User(text) in &req.messages {
        let text = match system.take() {
            Some(system) => format!("{system}\n\nUser: {text}"),
            None => text.clone(),
        };
        contents.push(Content::text("user", text));
    }
    if let Some(system) = system {
        // No user turn to attach to.
        contents.insert(0, Content::text("user", system.to_owned()));
    }

    let generation = &req.generation;
    GenerateContentRequest {
        contents,
        generation_config: GenerationConfig {
            temperature: generation.temperature,
            top_k: generation.top_k,
            top_p: generation.top_p,
            max_output_tokens: generation.max_output_tokens,
        },
    }
}

/// Pulls the first candidate's text out of a decoded response.
pub fn extract_response(
    resp: GenerateContentResponse,
) -> Result<ModelResponse, Error> {
    let block_reason = resp
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason);
    if let Some(block_reason) = block_reason {
        return Err(Error::new(
            format!("prompt blocked: {block_reason}"),
            ErrorKind::Moderated,
        ));
    }

    let Some(candidate) = resp.candidates.into_iter().next() else {
        return Err(Error::new("no candidates", ErrorKind::EmptyResponse));
    };
    let finish_reason =
        candidate.finish_reason.as_deref().map(map_finish_reason);
    let text = candidate
        .content
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text);
    match text {
        Some(text) if !text.trim().is_empty() => Ok(ModelResponse {
            text,
            finish_reason,
        }),
        _ => Err(Error::new(
            "candidate has no text part",
            ErrorKind::EmptyResponse,
        )),
    }
}

#[inline]
fn map_finish_reason(reason: &str) -> ModelFinishReason {
    match reason {
        "STOP" => ModelFinishReason::Stop,
        "MAX_TOKENS" => ModelFinishReason::MaxTokens,
        "SAFETY" => ModelFinishReason::Safety,
        _ => ModelFinishReason::Other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use support_chat_model::{
        GenerationConfig as ModelGenerationConfig, ModelProviderError,
    };

    use super::*;

    fn request(messages: Vec<ModelMessage>) -> ModelRequest {
        ModelRequest {
            system: Some("You are a helpful assistant.".to_owned()),
            messages,
            generation: ModelGenerationConfig::default(),
        }
    }

    #[test]
    fn test_create_request() {
        let req = request(vec![ModelMessage::User("Hello".to_owned())]);
        let body = serde_json::to_value(create_request(&req)).unwrap();
        let expected = json!({
            "contents": [{
                "role": "user",
                "parts": [{
                    "text": "You are a helpful assistant.\n\nUser: Hello"
                }]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "topK": 40,
                "topP": 0.95,
                "maxOutputTokens": 1024
            }
        });
        // f32 sampling parameters are compared with a tolerance.
        assert_eq!(body["contents"], expected["contents"]);
        assert_eq!(body["generationConfig"]["topK"], 40);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        let temperature =
            body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_create_multi_message_request() {
        let req = request(vec![
            ModelMessage::User("Hi".to_owned()),
            ModelMessage::User("Pricing?".to_owned()),
        ]);
        let body = create_request(&req);
        assert_eq!(body.contents.len(), 2);
        assert_eq!(body.contents[1].role.as_deref(), Some("user"));
        assert_eq!(
            body.contents[1].parts[0].text.as_deref(),
            Some("Pricing?")
        );
    }

    #[test]
    fn test_create_request_without_user_turn() {
        let req = request(vec![]);
        let body = create_request(&req);
        assert_eq!(body.contents.len(), 1);
        assert_eq!(
            body.contents[0].parts[0].text.as_deref(),
            Some("You are a helpful assistant.")
        );
    }

    #[test]
    fn test_extract_response() {
        let resp: GenerateContentResponse = serde_json::from_str(
            include_str!("../fixtures/generate_content_response.json"),
        )
        .unwrap();
        let resp = extract_response(resp).unwrap();
        assert!(resp.text.starts_with("Resezy offers"));
        assert_eq!(resp.finish_reason, Some(ModelFinishReason::Stop));
    }

    #[test]
    fn test_extract_missing_candidates() {
        let resp: GenerateContentResponse =
            serde_json::from_value(json!({})).unwrap();
        let err = extract_response(resp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResponse);

        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        let err = extract_response(resp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResponse);
    }

    #[test]
    fn test_extract_blocked_prompt() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        let err = extract_response(resp).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Moderated);
    }

    #[test]
    fn test_malformed_payload_is_rejected_by_serde() {
        let result = serde_json::from_value::<GenerateContentResponse>(json!({
            "candidates": "not a list"
        }));
        assert!(result.is_err());
    }
}
