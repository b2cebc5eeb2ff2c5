use tracing::{debug, info, warn};

use crate::ai::{Completer, CompletionJob};
use crate::error::ApiError;
use crate::state::{ChatMessage, ChatReply, RequestState};
use crate::view::{ActionButton, Notice};

pub const SUMMARY_LABEL: &str = "AI Summary";
pub const SUMMARY_BUSY_LABEL: &str = "Summarizing...";
const SUMMARY_ERROR: &str = "AI Summary: Error connecting to the API.";

/// One-shot "summarize my experience" button.
#[derive(Debug, Clone)]
pub struct SummaryAction {
    prompt: String,
    button: ActionButton,
    state: RequestState,
    notice: Option<Notice>,
}

impl SummaryAction {
    /// `prompt` is the full user message, biography included.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            button: ActionButton::new(SUMMARY_LABEL),
            state: RequestState::Idle,
            notice: None,
        }
    }

    pub fn begin(&mut self) -> Option<CompletionJob> {
        if self.state.is_pending() || self.button.is_disabled() {
            debug!(affordance = "summary", "trigger ignored, button disabled");
            return None;
        }

        self.button.disable(SUMMARY_BUSY_LABEL);
        self.notice = None;
        self.state = RequestState::Pending;

        Some(CompletionJob::new(vec![ChatMessage::user(&self.prompt)], None))
    }

    /// The button comes back on whatever the outcome.
    pub fn settle(&mut self, outcome: Result<ChatReply, ApiError>) {
        if !self.state.is_pending() {
            debug!(affordance = "summary", "settle ignored, nothing in flight");
            return;
        }

        match outcome {
            Ok(reply) => {
                info!(affordance = "summary", "summary received");
                self.notice = Some(Notice::new(format!("AI Summary: {}", reply.text())));
                self.state = RequestState::Succeeded(reply.into_text());
            }
            Err(err) => {
                warn!(affordance = "summary", error = %err, "summary request failed");
                self.notice = Some(Notice::new(SUMMARY_ERROR));
                self.state = RequestState::Failed(err.to_string());
            }
        }
        self.button.enable(SUMMARY_LABEL);
    }

    pub async fn submit<C>(&mut self, client: &C) -> bool
    where
        C: Completer + ?Sized,
    {
        let Some(job) = self.begin() else {
            return false;
        };
        let outcome = job.run(client).await;
        self.settle(outcome);
        true
    }

    pub fn button(&self) -> &ActionButton {
        &self.button
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Hand the pending notice to the front end, clearing it here.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Profile;
    use crate::state::ChatRole;
    use crate::widgets::testing::ScriptedCompleter;

    #[test]
    fn test_trigger_disables_immediately() {
        let mut action = SummaryAction::new("summarize me");
        let job = action.begin().unwrap();

        assert!(action.button().is_disabled());
        assert_eq!(action.button().label(), SUMMARY_BUSY_LABEL);
        assert!(action.state().is_pending());
        assert_eq!(job.system_prompt(), None);
        assert_eq!(job.messages(), &[ChatMessage::user("summarize me")]);
    }

    #[test]
    fn test_retrigger_while_disabled_is_ignored() {
        let mut action = SummaryAction::new("summarize me");
        action.begin();
        assert!(action.begin().is_none());
    }

    #[tokio::test]
    async fn test_success_reenables_and_notifies() {
        let client = ScriptedCompleter::replying(" Two lines. Of text. ");
        let mut action = SummaryAction::new(Profile::default().summary_prompt());

        assert!(action.submit(&client).await);

        assert!(!action.button().is_disabled());
        assert_eq!(action.button().label(), SUMMARY_LABEL);
        assert_eq!(
            action.take_notice().unwrap().text(),
            "AI Summary: Two lines. Of text."
        );
        assert!(action.notice().is_none());

        let calls = client.calls();
        assert_eq!(calls[0].messages.len(), 1);
        assert_eq!(calls[0].messages[0].role(), ChatRole::User);
        assert!(calls[0].messages[0]
            .content()
            .starts_with("Summarize this experience in 2 lines for a portfolio: "));
    }

    #[tokio::test]
    async fn test_failure_never_leaves_button_disabled() {
        let client = ScriptedCompleter::failing(ApiError::Transport("status 401".into()));
        let mut action = SummaryAction::new("summarize me");

        action.submit(&client).await;

        assert!(!action.button().is_disabled());
        assert_eq!(action.button().label(), SUMMARY_LABEL);
        assert_eq!(action.notice().unwrap().text(), SUMMARY_ERROR);
        assert!(matches!(action.state(), RequestState::Failed(_)));

        // A fresh trigger is accepted again.
        assert!(action.begin().is_some());
    }
}
