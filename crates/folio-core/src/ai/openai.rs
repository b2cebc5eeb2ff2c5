use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Completer;
use crate::config::Config;
use crate::error::ApiError;
use crate::state::{ChatMessage, ChatReply, ChatRole};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// Generation parameters are fixed for every call.
pub const MAX_TOKENS: u32 = 256;
pub const TEMPERATURE: f64 = 0.7;

/// Wire body for one chat-completion call. Built fresh per call.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ChatRequest {
    /// Prepends `system_prompt` (if any) to `messages`, keeping caller order.
    pub fn build(
        model: &str,
        messages: &[ChatMessage],
        system_prompt: Option<&str>,
    ) -> Result<Self, ApiError> {
        if !messages.iter().any(|m| m.role() == ChatRole::User) {
            return Err(ApiError::EmptyRequest);
        }

        let mut all = Vec::with_capacity(messages.len() + 1);
        if let Some(prompt) = system_prompt {
            all.push(ChatMessage::system(prompt));
        }
        all.extend(messages.iter().cloned());

        Ok(Self {
            model: model.to_string(),
            messages: all,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        })
    }
}

#[derive(Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

/// Extract `choices[0].message.content` from a response body.
pub fn parse_reply(body: &str) -> Result<ChatReply, ApiError> {
    let response: OpenAIResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| ChatReply::new(&content))
        .ok_or_else(|| ApiError::Parse("no content in first choice".to_string()))
}

#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAIClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Returns `None` when no API key is available from env or config.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.resolve_api_key()?;
        Some(
            Self::new(&api_key)
                .with_endpoint(config.endpoint())
                .with_model(config.model()),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Completer for OpenAIClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        system_prompt: Option<&str>,
    ) -> Result<ChatReply, ApiError> {
        let request = ChatRequest::build(&self.model, messages, system_prompt)?;
        debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            messages = request.messages.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(%status, body = %text, "completion endpoint returned an error status");
            return Err(ApiError::Transport(format!("status {}", status)));
        }

        let body = response.text().await?;
        parse_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_comes_first() {
        let messages = vec![ChatMessage::user("hello")];
        let request = ChatRequest::build(DEFAULT_MODEL, &messages, Some("be nice")).unwrap();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role(), ChatRole::System);
        assert_eq!(request.messages[0].content(), "be nice");
        assert_eq!(request.messages[1], ChatMessage::user("hello"));
    }

    #[test]
    fn test_caller_order_preserved_without_system_prompt() {
        let messages = vec![
            ChatMessage::user("one"),
            ChatMessage::assistant("two"),
            ChatMessage::user("three"),
        ];
        let request = ChatRequest::build(DEFAULT_MODEL, &messages, None).unwrap();
        assert_eq!(request.messages, messages);
    }

    #[test]
    fn test_request_without_user_message_is_rejected() {
        let messages = vec![ChatMessage::assistant("orphan")];
        let err = ChatRequest::build(DEFAULT_MODEL, &messages, Some("sys")).unwrap_err();
        assert!(matches!(err, ApiError::EmptyRequest));
    }

    #[test]
    fn test_request_wire_shape() {
        let request =
            ChatRequest::build("gpt-4o-mini", &[ChatMessage::user("hi")], None).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 256);
        assert_eq!(json["temperature"], 0.7);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_parse_reply_trims_whitespace() {
        let body = r#"{"choices":[{"message":{"content":"  hi there  "}}]}"#;
        assert_eq!(parse_reply(body).unwrap().text(), "hi there");
    }

    #[test]
    fn test_parse_reply_uses_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(parse_reply(body).unwrap().text(), "first");
    }

    #[test]
    fn test_parse_reply_missing_choices() {
        let err = parse_reply(r#"{"error":{"message":"nope"}}"#).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_reply_empty_choices() {
        let err = parse_reply(r#"{"choices":[]}"#).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_reply_null_content() {
        let err = parse_reply(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_reply_not_json() {
        let err = parse_reply("<html>bad gateway</html>").unwrap_err();
        assert!(err.is_parse());
    }
}
