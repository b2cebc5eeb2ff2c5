use std::collections::VecDeque;
use std::sync::Arc;

use folio_core::{
    ApiError, ChatPanel, ChatReply, ComingSoon, Completer, CompletionJob, Config, Notice,
    OpenAIClient, Recommender, SearchAction, SummaryAction,
};
use tokio::task::JoinHandle;
use tracing::warn;

type CallHandle = JoinHandle<Result<ChatReply, ApiError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Chat,
    Search,
    Actions,
}

impl FocusPane {
    pub fn next(self) -> Self {
        match self {
            FocusPane::Chat => FocusPane::Search,
            FocusPane::Search => FocusPane::Actions,
            FocusPane::Actions => FocusPane::Chat,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusPane::Chat => FocusPane::Actions,
            FocusPane::Search => FocusPane::Chat,
            FocusPane::Actions => FocusPane::Search,
        }
    }

    pub fn is_editable(self) -> bool {
        matches!(self, FocusPane::Chat | FocusPane::Search)
    }
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Single-line text box with a character-based cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,

    // Affordances
    pub chat: ChatPanel,
    pub summary: SummaryAction,
    pub search: SearchAction,
    pub recommender: Recommender,

    // Inputs
    pub chat_input: TextInput,
    pub search_input: TextInput,

    // Blocking notifications (summary result, coming-soon features), oldest first
    notices: VecDeque<Notice>,

    // Chat scroll state
    pub chat_scroll: u16,
    pub chat_view_height: u16, // Inner height of the transcript, set on draw
    chat_rendered_lines: u16,  // Wrapped line count from the last draw
    chat_follow: bool,         // Stick to the newest line on the next draw

    // Animation state
    pub animation_frame: u8, // 0-2 for loading animation

    // Connection info for the header
    pub model: String,
    pub key_source: Option<&'static str>,

    client: Option<Arc<dyn Completer>>,
    chat_task: Option<CallHandle>,
    summary_task: Option<CallHandle>,
    search_task: Option<CallHandle>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let client = OpenAIClient::from_config(config)
            .map(|client| Arc::new(client) as Arc<dyn Completer>);
        Self::with_client(config, client)
    }

    pub fn with_client(config: &Config, client: Option<Arc<dyn Completer>>) -> Self {
        let profile = config.profile.clone();

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            focus: FocusPane::Chat,

            chat: ChatPanel::new(profile.persona.clone()),
            summary: SummaryAction::new(profile.summary_prompt()),
            search: SearchAction::new(profile),
            recommender: Recommender::new(),

            chat_input: TextInput::default(),
            search_input: TextInput::default(),

            notices: VecDeque::new(),

            chat_scroll: 0,
            chat_view_height: 0,
            chat_rendered_lines: 0,
            chat_follow: true,

            animation_frame: 0,

            model: config.model().to_string(),
            key_source: config.key_source(),

            client,
            chat_task: None,
            summary_task: None,
            search_task: None,
        }
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    pub fn is_busy(&self) -> bool {
        self.chat.state().is_pending()
            || self.summary.state().is_pending()
            || self.search.state().is_pending()
    }

    /// Blank input leaves both the input box and the transcript untouched.
    pub fn submit_chat(&mut self) {
        let Some(job) = self.chat.begin(&self.chat_input.value) else {
            return;
        };
        self.chat_input.clear();
        self.scroll_chat_to_bottom();

        match self.spawn(job) {
            Ok(handle) => self.chat_task = Some(handle),
            Err(err) => self.chat.settle(Err(err)),
        }
    }

    pub fn submit_search(&mut self) {
        let Some(job) = self.search.begin(&self.search_input.value) else {
            return;
        };

        match self.spawn(job) {
            Ok(handle) => self.search_task = Some(handle),
            Err(err) => self.search.settle(Err(err)),
        }
    }

    pub fn trigger_summary(&mut self) {
        let Some(job) = self.summary.begin() else {
            return;
        };

        match self.spawn(job) {
            Ok(handle) => self.summary_task = Some(handle),
            Err(err) => {
                self.summary.settle(Err(err));
                self.queue_summary_notice();
            }
        }
    }

    pub fn trigger_recommendation(&mut self) {
        self.recommender.trigger();
    }

    pub fn trigger_coming_soon(&mut self, feature: ComingSoon) {
        self.notices.push_back(feature.trigger());
    }

    /// The notice on screen; later ones wait behind it.
    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn pending_notices(&self) -> usize {
        self.notices.len()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    fn queue_summary_notice(&mut self) {
        if let Some(notice) = self.summary.take_notice() {
            self.notices.push_back(notice);
        }
    }

    fn spawn(&self, job: CompletionJob) -> Result<CallHandle, ApiError> {
        let Some(client) = self.client.clone() else {
            warn!("no API key configured, call not sent");
            return Err(ApiError::Transport("no API key configured".to_string()));
        };
        Ok(tokio::spawn(async move { job.run(client.as_ref()).await }))
    }

    /// Settle any affordance whose call has finished.
    pub async fn poll_tasks(&mut self) {
        if let Some(outcome) = take_finished(&mut self.chat_task).await {
            self.chat.settle(outcome);
            self.scroll_chat_to_bottom();
        }

        if let Some(outcome) = take_finished(&mut self.summary_task).await {
            self.summary.settle(outcome);
            self.queue_summary_notice();
        }

        if let Some(outcome) = take_finished(&mut self.search_task).await {
            self.search.settle(outcome);
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_busy() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn scroll_chat_up(&mut self, lines: u16) {
        self.chat_follow = false;
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_chat_down(&mut self, lines: u16) {
        let max = self.max_chat_scroll();
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(max);
        self.chat_follow = self.chat_scroll == max;
    }

    pub fn scroll_chat_to_top(&mut self) {
        self.chat_follow = false;
        self.chat_scroll = 0;
    }

    /// Keep the newest line in view, now and after the next draw re-wraps.
    pub fn scroll_chat_to_bottom(&mut self) {
        self.chat_follow = true;
        self.chat_scroll = self.max_chat_scroll();
    }

    /// Record the transcript geometry from a draw. `rendered_lines` is the
    /// wrapped height of the whole transcript at the current width.
    pub fn fit_chat_view(&mut self, view_height: u16, rendered_lines: u16) {
        self.chat_view_height = view_height;
        self.chat_rendered_lines = rendered_lines;
        let max = self.max_chat_scroll();
        self.chat_scroll = if self.chat_follow {
            max
        } else {
            self.chat_scroll.min(max)
        };
    }

    fn max_chat_scroll(&self) -> u16 {
        self.chat_rendered_lines.saturating_sub(self.chat_view_height)
    }
}

async fn take_finished(slot: &mut Option<CallHandle>) -> Option<Result<ChatReply, ApiError>> {
    if !slot.as_ref().is_some_and(|handle| handle.is_finished()) {
        return None;
    }
    let handle = slot.take()?;
    Some(match handle.await {
        Ok(outcome) => outcome,
        Err(join_err) => Err(ApiError::Transport(format!("task failed: {}", join_err))),
    })
}
