//! Static extras that never hit the network.

use crate::view::{Bubble, BubbleKind, Notice, ResultPane};

const RECOMMENDATION: &str = "AI Suggests: Check out the \"Advance — Bankist (DOM)\" project for \
a great example of automation!";
const COMING_SOON: &str = "This AI feature is coming soon!";

/// Project recommender. Canned suggestion, shown in its own pane.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    pane: ResultPane,
}

impl Recommender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&mut self) {
        self.pane.replace(Bubble::new(BubbleKind::Bot, RECOMMENDATION));
    }

    pub fn pane(&self) -> &ResultPane {
        &self.pane
    }
}

/// Placeholder features that only announce themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComingSoon {
    Voice,
    Testimonials,
    ResumeAnalyzer,
}

impl ComingSoon {
    pub fn all() -> Vec<ComingSoon> {
        vec![ComingSoon::Voice, ComingSoon::Testimonials, ComingSoon::ResumeAnalyzer]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ComingSoon::Voice => "Voice assistant",
            ComingSoon::Testimonials => "AI testimonials",
            ComingSoon::ResumeAnalyzer => "Resume analyzer",
        }
    }

    pub fn trigger(&self) -> Notice {
        Notice::new(COMING_SOON)
    }
}
