use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{ChatMessage, Model};

/// Body of a `POST /chat/completions` request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    /// The model that will complete the conversation.
    pub model: Model,

    /// The full ordered message list, system instruction first.
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature; omitted to use the provider default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatCompletionRequest {
    /// Create a new request.
    pub fn new(model: Model, messages: Vec<ChatMessage>) -> Self {
        Self {
            model,
            messages,
            temperature: None,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Body of a successful `POST /chat/completions` response.
///
/// Only the fields the chat session consumes are modelled; everything else the provider sends
/// is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionResponse {
    /// Provider-assigned completion ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The model that actually served the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Candidate completions.  The session only ever asks for one.
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token accounting, when the provider reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<CompletionUsage>,
}

/// One candidate completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// Position of this choice in the response.
    #[serde(default)]
    pub index: u32,

    /// The generated message.
    pub message: ResponseMessage,

    /// Why generation stopped, e.g. `stop` or `length`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// The assistant message inside a [`Choice`].
///
/// `content` is nullable on the wire (refusals and tool calls leave it empty).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseMessage {
    /// Role the provider assigned; always `assistant` in practice.
    pub role: String,

    /// Generated text.
    #[serde(default)]
    pub content: Option<String>,

    /// Refusal text, when the model declined to answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
}

/// Token usage reported by the provider.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CompletionUsage {
    /// Tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u64,

    /// Tokens in the completion.
    #[serde(default)]
    pub completion_tokens: u64,

    /// Sum of prompt and completion tokens.
    #[serde(default)]
    pub total_tokens: u64,
}

impl ChatCompletionResponse {
    /// Extract the text of the first choice.
    ///
    /// A response without choices, or whose first choice carries neither content nor a
    /// refusal, is malformed.
    pub fn into_text(self) -> Result<String> {
        let Some(choice) = self.choices.into_iter().next() else {
            return Err(Error::serialization(
                "completion response contained no choices",
                None,
            ));
        };
        match (choice.message.content, choice.message.refusal) {
            (Some(content), _) => Ok(content),
            (None, Some(refusal)) => Ok(refusal),
            (None, None) => Err(Error::serialization(
                "completion response contained no message content",
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;
    use serde_json::{json, to_value};

    #[test]
    fn request_wire_format() {
        let request = ChatCompletionRequest::new(
            Model::Known(KnownModel::Gpt51),
            vec![
                ChatMessage::system("You are terse."),
                ChatMessage::user("Hi"),
            ],
        )
        .with_temperature(Some(1.0));

        assert_eq!(
            to_value(&request).unwrap(),
            json!({
                "model": "gpt-5.1",
                "messages": [
                    {"role": "system", "content": "You are terse."},
                    {"role": "user", "content": "Hi"}
                ],
                "temperature": 1.0
            })
        );
    }

    #[test]
    fn request_omits_unset_temperature() {
        let request = ChatCompletionRequest::new(Model::default(), vec![]);
        let json = to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn response_first_choice_text() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-5.1",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "OK"},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 1, "total_tokens": 11}
        }))
        .unwrap();

        assert_eq!(response.usage.unwrap().total_tokens, 11);
        assert_eq!(response.into_text().unwrap(), "OK");
    }

    #[test]
    fn response_without_choices_is_malformed() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(response.into_text().unwrap_err().is_serialization());
    }

    #[test]
    fn response_with_null_content_falls_back_to_refusal() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": null, "refusal": "No."}}
            ]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "No.");

        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert!(response.into_text().is_err());
    }
}
