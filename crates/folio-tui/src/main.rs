use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::*;
use folio_core::config::{mask_key, API_KEY_ENV};
use folio_core::{
    Bubble, BubbleKind, ChatPanel, Config, OpenAIClient, Recommender, SearchAction, SummaryAction,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio AI assistant: chat, experience summary, and semantic search")]
#[command(version)]
struct Cli {
    /// Run a one-shot command instead of the interactive TUI
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the portfolio assistant a single question
    Chat {
        /// Your message
        message: String,
    },
    /// Summarize the experience section in two lines
    Summary,
    /// Answer a question against the portfolio's site context
    Search {
        /// Search query
        query: String,
    },
    /// Show the recommended project
    Recommend,
    /// Manage the API key and settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Store the API key in the config file
    SetKey {
        key: String,
    },
    /// Print the active settings (key masked)
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.is_none())?;

    let config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "could not read config, using defaults");
        Config::new()
    });

    match cli.command {
        None => run_tui(&config).await?,
        Some(Commands::Chat { message }) => run_chat(&config, &message).await?,
        Some(Commands::Summary) => run_summary(&config).await?,
        Some(Commands::Search { query }) => run_search(&config, &query).await?,
        Some(Commands::Recommend) => run_recommend(),
        Some(Commands::Config { action }) => run_config(&config, action)?,
    }

    Ok(())
}

/// Filter used when `RUST_LOG` is unset. One-shot commands stay quiet on
/// stderr unless something goes wrong.
fn default_filter(to_file: bool) -> String {
    let level = if to_file { "info" } else { "warn" };
    format!("folio={level},folio_core={level}")
}

/// TUI logs go to a file since the terminal is in the alternate screen.
fn init_logging(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(to_file)));

    if to_file {
        let log_dir = Config::config_dir()?;
        fs::create_dir_all(&log_dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("folio.log"))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

async fn run_tui(config: &Config) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut app = App::new(config);
    let mut events = EventHandler::new(tui::TICK_RATE);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }

        app.poll_tasks().await;
    }
    Ok(())
}

fn require_client(config: &Config) -> Result<OpenAIClient> {
    OpenAIClient::from_config(config).ok_or_else(|| {
        anyhow!(
            "No API key configured. Set {} or run: folio config set-key <KEY>",
            API_KEY_ENV
        )
    })
}

fn print_bubble(bubble: &Bubble) {
    match bubble.kind {
        BubbleKind::User => println!("{} {}", "You:".bold().cyan(), bubble.text),
        BubbleKind::Bot => println!("{} {}", "AI:".bold().yellow(), bubble.text),
        BubbleKind::Loading => println!("{}", bubble.text.dimmed()),
        BubbleKind::Error => println!("{}", bubble.text.red()),
    }
}

async fn run_chat(config: &Config, message: &str) -> Result<()> {
    let client = require_client(config)?;
    let mut panel = ChatPanel::new(config.profile.persona.clone());

    println!("🤖 Asking {}...\n", client.model().bold().magenta());
    if !panel.submit(&client, message).await {
        return Err(anyhow!("Message is empty"));
    }

    for bubble in panel.transcript().bubbles() {
        print_bubble(bubble);
    }
    Ok(())
}

async fn run_summary(config: &Config) -> Result<()> {
    let client = require_client(config)?;
    let mut action = SummaryAction::new(config.profile.summary_prompt());

    println!("{}", action.button().label().dimmed());
    action.submit(&client).await;

    if let Some(notice) = action.take_notice() {
        println!("{}", notice.text());
    }
    Ok(())
}

async fn run_search(config: &Config, query: &str) -> Result<()> {
    let client = require_client(config)?;
    let mut search = SearchAction::new(config.profile.clone());

    println!("🔍 Searching for: {}\n", query.bold().cyan());
    if !search.submit(&client, query).await {
        return Err(anyhow!("Query is empty"));
    }

    if let Some(bubble) = search.pane().content() {
        print_bubble(bubble);
    }
    Ok(())
}

fn run_recommend() {
    let mut recommender = Recommender::new();
    recommender.trigger();
    if let Some(bubble) = recommender.pane().content() {
        println!("{}", bubble.text.green());
    }
}

fn run_config(config: &Config, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::SetKey { key } => {
            Config::save_api_key(key.trim())?;
            println!("{} {}", "API key saved to".green(), Config::get_config_path()?.display());
        }
        ConfigAction::Show => {
            println!("\n{}", "⚙️  folio settings".bold().blue());
            println!("{}", "=".repeat(30).dimmed());
            println!("  endpoint: {}", config.endpoint());
            println!("  model:    {}", config.model());
            match (config.resolve_api_key(), config.key_source()) {
                (Some(key), Some(source)) => {
                    println!("  api key:  {} ({})", mask_key(&key), source.dimmed())
                }
                _ => println!("  api key:  {}", "not set".red()),
            }
            println!("  config:   {}", Config::get_config_path()?.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_per_mode() {
        assert_eq!(default_filter(true), "folio=info,folio_core=info");
        assert_eq!(default_filter(false), "folio=warn,folio_core=warn");
    }

    #[test]
    fn test_default_filter_parses() {
        for to_file in [true, false] {
            assert!(EnvFilter::try_new(default_filter(to_file)).is_ok());
        }
    }
}
