use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use folio_core::ComingSoon;
use crate::app::{App, FocusPane, InputMode};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        // The next draw re-fits every pane
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // A notice blocks everything until dismissed
    if app.notice().is_some() {
        app.dismiss_notice();
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),

        KeyCode::Char('i') | KeyCode::Char('/') => {
            if app.focus.is_editable() {
                app.input_mode = InputMode::Editing;
            }
        }
        KeyCode::Enter => {
            if app.focus.is_editable() {
                app.input_mode = InputMode::Editing;
            } else {
                app.trigger_summary();
            }
        }

        // Actions
        KeyCode::Char('s') => app.trigger_summary(),
        KeyCode::Char('r') => app.trigger_recommendation(),
        KeyCode::Char('v') => app.trigger_coming_soon(ComingSoon::Voice),
        KeyCode::Char('t') => app.trigger_coming_soon(ComingSoon::Testimonials),
        KeyCode::Char('a') => app.trigger_coming_soon(ComingSoon::ResumeAnalyzer),

        // Transcript scrolling
        KeyCode::Char('j') | KeyCode::Down => app.scroll_chat_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_chat_up(1),
        KeyCode::PageDown => app.scroll_chat_down(app.chat_view_height.max(1)),
        KeyCode::PageUp => app.scroll_chat_up(app.chat_view_height.max(1)),
        KeyCode::Char('G') | KeyCode::End => app.scroll_chat_to_bottom(),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_chat_to_top(),

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        app.input_mode = InputMode::Normal;
        return;
    }

    if key.code == KeyCode::Enter {
        match app.focus {
            FocusPane::Chat => app.submit_chat(),
            FocusPane::Search => app.submit_search(),
            FocusPane::Actions => {}
        }
        return;
    }

    let input = match app.focus {
        FocusPane::Chat => &mut app.chat_input,
        FocusPane::Search => &mut app.search_input,
        FocusPane::Actions => return,
    };

    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        KeyCode::Char(c) => input.insert(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Config;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn offline_app() -> App {
        App::with_client(&Config::new(), None)
    }

    #[test]
    fn test_ctrl_c_quits_from_editing() {
        let mut app = offline_app();
        app.input_mode = InputMode::Editing;
        handle_event(
            &mut app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_goes_to_focused_input() {
        let mut app = offline_app();
        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Char('i')));
        for c in "qa".chars() {
            handle_event(&mut app, key(KeyCode::Char(c)));
        }

        assert_eq!(app.focus, FocusPane::Search);
        assert_eq!(app.search_input.value, "qa");
        assert!(app.chat_input.value.is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_blank_enter_keeps_editing_and_sends_nothing() {
        let mut app = offline_app();
        app.input_mode = InputMode::Editing;
        handle_event(&mut app, key(KeyCode::Char(' ')));
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.input_mode, InputMode::Editing);
        assert!(app.chat.transcript().is_empty());
    }

    #[test]
    fn test_notice_swallows_next_key() {
        let mut app = offline_app();
        handle_event(&mut app, key(KeyCode::Char('v')));
        assert!(app.notice().is_some());

        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.notice().is_none());
        assert!(!app.should_quit);

        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_queued_notices_each_take_one_key() {
        let mut app = offline_app();
        handle_event(&mut app, key(KeyCode::Char('v')));
        // Second notice arrives behind the first one
        app.trigger_coming_soon(ComingSoon::Testimonials);
        assert_eq!(app.pending_notices(), 2);

        // Dismissal swallows the key, so 'a' opens nothing new
        handle_event(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.pending_notices(), 1);
        handle_event(&mut app, key(KeyCode::Char('a')));
        assert!(app.notice().is_none());
    }

    #[test]
    fn test_recommend_key_fills_pane() {
        let mut app = offline_app();
        handle_event(&mut app, key(KeyCode::Char('r')));
        assert!(app.recommender.pane().content().is_some());
    }
}
