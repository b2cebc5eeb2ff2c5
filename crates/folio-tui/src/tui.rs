use std::io::{self, Stderr};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

/// Drives the loading animation and lets finished calls get picked up.
pub const TICK_RATE: Duration = Duration::from_millis(300);

/// What the main loop reacts to. A resize carries no size because the next
/// draw re-measures every pane anyway.
#[derive(Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Map a raw terminal event onto the app's vocabulary.
fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Windows reports releases too
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(..) => Some(AppEvent::Resize),
        _ => None,
    }
}

async fn forward_terminal(tx: UnboundedSender<AppEvent>) {
    let mut stream = EventStream::new();
    while let Some(Ok(raw)) = stream.next().await {
        let Some(event) = translate(raw) else {
            continue;
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

async fn forward_ticks(tx: UnboundedSender<AppEvent>, every: Duration) {
    let mut interval = tokio::time::interval(every);
    loop {
        interval.tick().await;
        if tx.send(AppEvent::Tick).is_err() {
            return;
        }
    }
}

/// Merges keyboard input and the animation tick into one queue.
pub struct EventHandler {
    rx: UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(forward_terminal(tx.clone()));
        tokio::spawn(forward_ticks(tx, tick_rate));
        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(io::stderr()))?)
}

pub fn restore() -> Result<()> {
    execute!(io::stderr(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Leave the alternate screen before the panic message prints.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_only_key_presses_pass_through() {
        let press = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Release);

        assert_eq!(translate(Event::Key(press)), Some(AppEvent::Key(press)));
        assert_eq!(translate(Event::Key(release)), None);
        assert_eq!(translate(Event::FocusGained), None);
    }

    #[test]
    fn test_resize_drops_dimensions() {
        assert_eq!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize));
    }

    #[tokio::test]
    async fn test_ticks_arrive_on_the_queue() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(forward_ticks(tx, Duration::from_millis(5)));

        let first = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert_eq!(first.ok().flatten(), Some(AppEvent::Tick));
    }
}
