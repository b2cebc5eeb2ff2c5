use tracing::{debug, info, warn};

use super::API_ERROR_MESSAGE;
use crate::ai::{Completer, CompletionJob};
use crate::content::Profile;
use crate::error::ApiError;
use crate::state::{ChatMessage, ChatReply, RequestState};
use crate::view::{Bubble, BubbleKind, ResultPane};

pub const SEARCH_LOADING: &str = "[AI is searching...]";

/// Question box answered against the fixed site context.
#[derive(Debug, Clone)]
pub struct SearchAction {
    profile: Profile,
    pane: ResultPane,
    state: RequestState,
}

impl SearchAction {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            pane: ResultPane::new(),
            state: RequestState::Idle,
        }
    }

    pub fn begin(&mut self, query: &str) -> Option<CompletionJob> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if self.state.is_pending() {
            debug!(affordance = "search", "query ignored, search still pending");
            return None;
        }

        self.pane
            .replace(Bubble::new(BubbleKind::Loading, SEARCH_LOADING));
        self.state = RequestState::Pending;

        Some(CompletionJob::new(
            vec![ChatMessage::user(self.profile.search_prompt(query))],
            None,
        ))
    }

    pub fn settle(&mut self, outcome: Result<ChatReply, ApiError>) {
        if !self.state.is_pending() {
            debug!(affordance = "search", "settle ignored, nothing in flight");
            return;
        }

        match outcome {
            Ok(reply) => {
                info!(affordance = "search", "search answer received");
                self.pane.replace(Bubble::new(BubbleKind::Bot, reply.text()));
                self.state = RequestState::Succeeded(reply.into_text());
            }
            Err(err) => {
                warn!(affordance = "search", error = %err, "search request failed");
                self.pane
                    .replace(Bubble::new(BubbleKind::Error, API_ERROR_MESSAGE));
                self.state = RequestState::Failed(err.to_string());
            }
        }
    }

    pub async fn submit<C>(&mut self, client: &C, query: &str) -> bool
    where
        C: Completer + ?Sized,
    {
        let Some(job) = self.begin(query) else {
            return false;
        };
        let outcome = job.run(client).await;
        self.settle(outcome);
        true
    }

    pub fn pane(&self) -> &ResultPane {
        &self.pane
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::testing::ScriptedCompleter;

    fn profile() -> Profile {
        Profile {
            site_context: "Skills: Selenium.".into(),
            ..Profile::default()
        }
    }

    #[tokio::test]
    async fn test_blank_query_is_a_no_op() {
        let client = ScriptedCompleter::replying("unused");
        let mut search = SearchAction::new(profile());

        assert!(!search.submit(&client, "   ").await);
        assert!(client.calls().is_empty());
        assert_eq!(search.pane(), &ResultPane::new());
        assert_eq!(search.state(), &RequestState::Idle);
    }

    #[test]
    fn test_begin_shows_placeholder() {
        let mut search = SearchAction::new(profile());
        let job = search.begin(" selenium? ").unwrap();

        let shown = search.pane().content().unwrap();
        assert_eq!(shown.kind, BubbleKind::Loading);
        assert_eq!(shown.text, SEARCH_LOADING);

        assert_eq!(job.system_prompt(), None);
        assert_eq!(
            job.messages()[0].content(),
            "Given this portfolio context: Skills: Selenium.\nAnswer this user query: selenium?"
        );
    }

    #[tokio::test]
    async fn test_result_replaces_placeholder() {
        let client = ScriptedCompleter::replying("Yes, Selenium.\n");
        let mut search = SearchAction::new(profile());

        search.submit(&client, "selenium?").await;

        let shown = search.pane().content().unwrap();
        assert_eq!(shown, &Bubble::new(BubbleKind::Bot, "Yes, Selenium."));
    }

    #[tokio::test]
    async fn test_parse_failure_shows_fixed_message() {
        let client = ScriptedCompleter::failing(ApiError::Parse("missing field `choices`".into()));
        let mut search = SearchAction::new(profile());

        search.submit(&client, "anything").await;

        let shown = search.pane().content().unwrap();
        assert_eq!(shown, &Bubble::new(BubbleKind::Error, API_ERROR_MESSAGE));
        assert!(!shown.text.contains("choices"));
    }

    #[test]
    fn test_query_while_pending_is_rejected() {
        let mut search = SearchAction::new(profile());
        search.begin("one");
        assert!(search.begin("two").is_none());
    }
}
