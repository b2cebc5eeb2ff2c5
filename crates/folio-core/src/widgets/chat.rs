use tracing::{debug, info, warn};

use super::API_ERROR_MESSAGE;
use crate::ai::{Completer, CompletionJob};
use crate::error::ApiError;
use crate::state::{ChatMessage, ChatReply, RequestState};
use crate::view::{Bubble, BubbleKind, Transcript};

pub const CHAT_LOADING: &str = "[AI is typing...]";

/// Chat panel. The transcript keeps growing, but each call carries only the
/// newest user message plus the persona prompt.
#[derive(Debug, Clone)]
pub struct ChatPanel {
    persona: String,
    transcript: Transcript,
    state: RequestState,
}

impl ChatPanel {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            transcript: Transcript::new(),
            state: RequestState::Idle,
        }
    }

    /// Returns `None` without touching anything for blank input or while a
    /// reply is still pending.
    pub fn begin(&mut self, input: &str) -> Option<CompletionJob> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        if self.state.is_pending() {
            debug!(affordance = "chat", "submit ignored, reply still pending");
            return None;
        }

        self.transcript.push(Bubble::new(BubbleKind::User, message));
        self.transcript.push(Bubble::new(BubbleKind::Loading, CHAT_LOADING));
        self.state = RequestState::Pending;

        Some(CompletionJob::new(
            vec![ChatMessage::user(message)],
            Some(self.persona.clone()),
        ))
    }

    pub fn settle(&mut self, outcome: Result<ChatReply, ApiError>) {
        if !self.state.is_pending() {
            debug!(affordance = "chat", "settle ignored, nothing in flight");
            return;
        }

        self.transcript.remove_loading();
        match outcome {
            Ok(reply) => {
                info!(affordance = "chat", chars = reply.text().len(), "reply received");
                self.transcript.push(Bubble::new(BubbleKind::Bot, reply.text()));
                self.state = RequestState::Succeeded(reply.into_text());
            }
            Err(err) => {
                warn!(affordance = "chat", error = %err, "chat request failed");
                self.transcript
                    .push(Bubble::new(BubbleKind::Error, API_ERROR_MESSAGE));
                self.state = RequestState::Failed(err.to_string());
            }
        }
    }

    /// Runs a whole submission. Returns false if the input was rejected.
    pub async fn submit<C>(&mut self, client: &C, input: &str) -> bool
    where
        C: Completer + ?Sized,
    {
        let Some(job) = self.begin(input) else {
            return false;
        };
        let outcome = job.run(client).await;
        self.settle(outcome);
        true
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }
}
