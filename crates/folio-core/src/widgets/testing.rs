use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ai::Completer;
use crate::error::ApiError;
use crate::state::{ChatMessage, ChatReply};

/// A call as seen by the transport layer.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub system_prompt: Option<String>,
}

/// Hands out queued outcomes in order and records every call.
#[derive(Default)]
pub struct ScriptedCompleter {
    outcomes: Mutex<VecDeque<Result<ChatReply, ApiError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedCompleter {
    pub fn replying(text: &str) -> Self {
        let completer = Self::default();
        completer.push(Ok(ChatReply::new(text)));
        completer
    }

    pub fn failing(err: ApiError) -> Self {
        let completer = Self::default();
        completer.push(Err(err));
        completer
    }

    pub fn push(&self, outcome: Result<ChatReply, ApiError>) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Completer for ScriptedCompleter {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        system_prompt: Option<&str>,
    ) -> Result<ChatReply, ApiError> {
        self.calls.lock().unwrap().push(RecordedCall {
            messages: messages.to_vec(),
            system_prompt: system_prompt.map(str::to_string),
        });
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted outcome".to_string())))
    }
}
