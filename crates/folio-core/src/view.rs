//! Render targets owned by the widget controllers.
//!
//! Controllers describe what should be on screen with these types; a front end
//! only has to draw them. Text is always plain, never markup.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleKind {
    User,
    Bot,
    Loading,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    pub kind: BubbleKind,
    pub text: String,
}

impl Bubble {
    pub fn new(kind: BubbleKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.kind == BubbleKind::Loading
    }
}

/// Append-only list of chat bubbles, except for the loading placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    bubbles: Vec<Bubble>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bubble: Bubble) {
        self.bubbles.push(bubble);
    }

    /// Drop the loading placeholder. Returns false if there was none.
    pub fn remove_loading(&mut self) -> bool {
        match self.bubbles.iter().position(Bubble::is_loading) {
            Some(idx) => {
                self.bubbles.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn last(&self) -> Option<&Bubble> {
        self.bubbles.last()
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn count(&self, kind: BubbleKind) -> usize {
        self.bubbles.iter().filter(|b| b.kind == kind).count()
    }
}

/// A container showing at most one result at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultPane {
    content: Option<Bubble>,
}

impl ResultPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, bubble: Bubble) {
        self.content = Some(bubble);
    }

    pub fn content(&self) -> Option<&Bubble> {
        self.content.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    label: String,
    disabled: bool,
}

impl ActionButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disable(&mut self, busy_label: &str) {
        self.disabled = true;
        self.label = busy_label.to_string();
    }

    pub fn enable(&mut self, label: &str) {
        self.disabled = false;
        self.label = label.to_string();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// A blocking notification: the front end shows it until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(String);

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_loading_keeps_other_bubbles_in_order() {
        let mut transcript = Transcript::new();
        transcript.push(Bubble::new(BubbleKind::User, "a"));
        transcript.push(Bubble::new(BubbleKind::Loading, "..."));
        transcript.push(Bubble::new(BubbleKind::Bot, "b"));

        assert!(transcript.remove_loading());
        let texts: Vec<&str> = transcript.bubbles().iter().map(|b| b.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(!transcript.remove_loading());
    }

    #[test]
    fn test_button_toggle() {
        let mut button = ActionButton::new("Go");
        button.disable("Going...");
        assert!(button.is_disabled());
        assert_eq!(button.label(), "Going...");
        button.enable("Go");
        assert!(!button.is_disabled());
        assert_eq!(button.label(), "Go");
    }
}
