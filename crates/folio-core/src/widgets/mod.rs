//! Widget controllers: one per affordance, each owning its render target and
//! request state.
//!
//! Every controller splits a call into `begin` (validate, show loading, hand
//! back a [`CompletionJob`](crate::ai::CompletionJob)) and `settle` (apply the
//! outcome). Front ends that can't hold `&mut self` across an await spawn the
//! job themselves; everything else can use `submit`.

pub mod chat;
pub mod extras;
pub mod search;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;

pub use chat::ChatPanel;
pub use extras::{ComingSoon, Recommender};
pub use search::SearchAction;
pub use summary::SummaryAction;

/// Error text shown by the chat panel and search box. The error detail is
/// never shown.
pub const API_ERROR_MESSAGE: &str = "[AI]: Error connecting to the API.";
