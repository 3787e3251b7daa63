//! student-tui - A terminal-based user interface for the student management service.

use std::io::{self, Stdout};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info};

use student_tui::api::StudentClient;
use student_tui::cli::Cli;
use student_tui::events::EventHandler;
use student_tui::tasks::TaskSpawner;
use student_tui::{logging, App, AppError, Route, Settings};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.debug).context("Failed to initialize logging")?;

    let settings = cli.resolve_settings().map_err(startup_error)?;
    info!(base_url = %settings.base_url, route = %cli.route, "Configuration loaded");

    let client = StudentClient::new(&settings.base_url, settings.request_timeout())
        .map_err(startup_error)?;

    install_panic_hook();
    let mut terminal = setup_terminal().context("Failed to set up terminal")?;

    let result = run(&mut terminal, settings, client, cli.route).await;

    restore_terminal().context("Failed to restore terminal")?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "Application exited with error");
    }
    logging::shutdown();
    result
}

/// Report a startup failure before the terminal is taken over.
fn startup_error(err: impl Into<AppError>) -> anyhow::Error {
    let err: AppError = err.into();
    error!(error = %err, "Startup failed");
    eprintln!("student-tui: {}", err.user_message());
    err.into()
}

/// Drive the TEA loop until the app asks to quit.
async fn run(
    terminal: &mut Tui,
    settings: Settings,
    client: StudentClient,
    route: Route,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let spawner = TaskSpawner::new(tx, client);
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);
    let mut app = App::new(settings, route);

    loop {
        for request in app.take_requests() {
            spawner.spawn(request);
        }

        terminal.draw(|frame| app.view(frame))?;

        // Polling blocks for up to one tick
        let event = tokio::task::block_in_place(|| events.next())?;
        app.update(event);

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)
}

/// Put the terminal back before the default hook prints the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}
