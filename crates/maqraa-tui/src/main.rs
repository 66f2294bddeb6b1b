//! maqraa TUI
//!
//! Terminal roster browser for the maqraa back office

use std::io;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod action;
mod app;
mod config;
mod event;
mod ui;

use app::App;
use event::EventHandler;
use maqraa_client::ClientConfig;

/// maqraa Terminal UI
#[derive(Parser, Debug)]
#[command(name = "maqraa-tui", version, about)]
struct Args {
    /// Server address (overrides the config file)
    #[arg(short, long)]
    server: Option<String>,

    /// Display language for backend data
    #[arg(long)]
    lang: Option<String>,

    /// Tick rate in milliseconds
    #[arg(long, default_value = "250")]
    tick_rate: u64,

    /// Enable debug logging to file
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    if args.debug {
        let file = std::fs::File::create("maqraa-tui.log")?;
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(file))
            .init();
    }

    let mut config = ClientConfig::load_default()?;
    if let Some(server) = args.server {
        config.api_url = server;
    }
    if let Some(lang) = args.lang {
        config.lang = lang;
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(args.tick_rate);
    let mut app = App::new(config);
    let result = run_app(&mut terminal, &mut app, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Run the application main loop
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut events = EventHandler::new(tick_rate);
    events.start();

    app.connect().await?;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events.next().await {
            let action = match event {
                event::Event::Key(key) => event::key_to_action(key, app.search_active),
                event::Event::Resize(_, _) => action::Action::Render,
                event::Event::Tick => action::Action::Tick,
            };
            app.handle_action(action).await?;
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
