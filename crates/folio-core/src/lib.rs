pub mod ai;
pub mod config;
pub mod content;
pub mod error;
pub mod state;
pub mod view;
pub mod widgets;

// Re-export main types for convenience
pub use ai::{Completer, CompletionJob, OpenAIClient};
pub use config::Config;
pub use content::Profile;
pub use error::ApiError;
pub use state::{ChatMessage, ChatReply, ChatRole, RequestState};
pub use view::{ActionButton, Bubble, BubbleKind, Notice, ResultPane, Transcript};
pub use widgets::{ChatPanel, ComingSoon, Recommender, SearchAction, SummaryAction};
