pub mod openai;

pub use openai::{ChatRequest, OpenAIClient};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::state::{ChatMessage, ChatReply};

/// Anything that can turn a message list into a single reply.
///
/// One call per invocation: implementations don't queue, batch, cache or retry.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        system_prompt: Option<&str>,
    ) -> Result<ChatReply, ApiError>;
}

/// A call prepared by a widget controller, ready to run against a [`Completer`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionJob {
    messages: Vec<ChatMessage>,
    system_prompt: Option<String>,
}

impl CompletionJob {
    pub fn new(messages: Vec<ChatMessage>, system_prompt: Option<String>) -> Self {
        Self {
            messages,
            system_prompt,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    pub async fn run<C>(&self, client: &C) -> Result<ChatReply, ApiError>
    where
        C: Completer + ?Sized,
    {
        client
            .complete(&self.messages, self.system_prompt.as_deref())
            .await
    }
}
