mod app;
mod config;
mod controller;
mod films;
mod logging;
mod ui;

use app::App;
use clap::{Parser, Subcommand};
use config::Config;
use controller::{Content, EMPTY_MESSAGE};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use films::{HttpTransport, Transport};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Fetch and browse the Star Wars films listing
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Films endpoint URL (overrides the config file)
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// Path to a config.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(short, long, global = true)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI (default)
    Run,
    /// Fetch once and print the result to stdout
    Fetch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            std::process::exit(1);
        }
    };
    if let Some(url) = cli.url {
        config.endpoint_url = url;
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout_secs = Some(secs);
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }

    let log_path = logging::init(&config.log_filter);
    info!(endpoint = %config.endpoint_url, log = ?log_path, "starting film-reel");

    let transport = HttpTransport::new(config.endpoint_url.clone(), config.request_timeout())?;
    let mut app = App::new(transport);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Fetch => {
            if !fetch_once(&mut app).await {
                std::process::exit(1);
            }
        }
        Commands::Run => {
            // Init terminal
            let mut terminal = ratatui::init();

            // Initial page size setup
            let size = terminal.size()?;
            app.update_page_size(size.height);

            // Main loop
            let result = run_app(&mut terminal, &mut app).await;

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Headless fetch with a spinner on stderr. Returns false if the fetch failed.
async fn fetch_once<T: Transport>(app: &mut App<T>) -> bool {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(format!("Fetching {}", app.endpoint()));
    pb.enable_steady_tick(Duration::from_millis(100));

    app.fetch_movies();
    app.wait_for_fetch().await;
    pb.finish_and_clear();
    info!(
        generation = app.state.generation(),
        count = app.state.movies().len(),
        error = app.state.error(),
        "headless fetch finished"
    );

    match app.state.content() {
        Content::Movies(movies) => {
            for row in ui::list::plain_rows(movies) {
                println!("{row}");
            }
            true
        }
        Content::Error(message) => {
            eprintln!("{message}");
            false
        }
        Content::Empty => {
            println!("{EMPTY_MESSAGE}");
            true
        }
        // wait_for_fetch only returns while loading if the channel closed
        Content::Loading => false,
    }
}

async fn run_app<T: Transport>(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App<T>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.drain_outcomes();
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll keeps the spinner moving and picks up fetch results promptly
        if crossterm::event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(_, height) => {
                    app.update_page_size(height);
                }
                _ => {}
            }
        }
    }
}

fn handle_key<T: Transport>(app: &mut App<T>, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('f') | KeyCode::Enter => {
            app.fetch_movies();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.list_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.list_prev();
        }
        KeyCode::PageDown => {
            app.list_page_down();
        }
        KeyCode::PageUp => {
            app.list_page_up();
        }
        KeyCode::Char('g') => {
            app.list_first();
        }
        KeyCode::Char('G') => {
            app.list_last();
        }
        KeyCode::Char('J') => {
            app.crawl_scroll_down();
        }
        KeyCode::Char('K') => {
            app.crawl_scroll_up();
        }
        _ => {}
    }
}
