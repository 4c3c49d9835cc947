mod app;
mod config;
mod error;
mod events;
mod log;
mod select;
mod tui;

use anyhow::Result;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, EventStream,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::time::Duration;

use app::App;
use config::Config;
use events::EventHandler;
use select::{Identity, OptionsChange, SelectHost};

const USAGE: &str = "\
Usage: picklist [OPTIONS]

Options:
  -c, --config <PATH>        Configuration file
      --identity <MODE>      Option identity: key | reference
      --on-options-change <POLICY>
                             keep | reset-highlight | reset
  -h, --help                 Print help";

/// Command line overrides
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    identity: Option<Identity>,
    on_options_change: Option<OptionsChange>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--config" | "-c", Some(path)) => {
                parsed.config = Some(PathBuf::from(path));
                i += 1;
            }
            ("--identity", Some(mode)) => {
                parsed.identity = match mode.as_str() {
                    "key" => Some(Identity::Key),
                    "reference" => Some(Identity::Reference),
                    other => {
                        eprintln!("Warning: unknown identity '{}', using config", other);
                        None
                    }
                };
                i += 1;
            }
            ("--on-options-change", Some(policy)) => {
                parsed.on_options_change = match policy.as_str() {
                    "keep" => Some(OptionsChange::Keep),
                    "reset-highlight" => Some(OptionsChange::ResetHighlight),
                    "reset" => Some(OptionsChange::Reset),
                    other => {
                        eprintln!("Warning: unknown policy '{}', using config", other);
                        None
                    }
                };
                i += 1;
            }
            ("--help" | "-h", _) => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            (flag, None) if flag.starts_with('-') => {
                eprintln!("Warning: {} requires an argument", flag);
            }
            (other, _) => {
                eprintln!("Warning: ignoring argument '{}'", other);
            }
        }
        i += 1;
    }

    parsed
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
    }
    log::install_panic_hook();

    let args = parse_args();

    // CLI > env var > config file > defaults
    let mut config = Config::load(args.config);
    if let Some(identity) = args.identity {
        config.identity = identity;
    }
    if let Some(policy) = args.on_options_change {
        config.on_options_change = policy;
    }

    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    for field in &app.fields {
        println!("{}: {}", field.host.title, field.host.value().describe());
    }
    log::log("=== picklist exited ===");

    Ok(result?)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> error::Result<()> {
    let mut event_stream = EventStream::new();

    loop {
        terminal.draw(|frame| tui::ui::render(frame, app))?;

        if app.should_quit {
            return Ok(());
        }

        // Redraw tick
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        let action = EventHandler::handle_event(app, &event);
                        app.dispatch(action);
                    }
                    Some(Err(e)) => {
                        log::log(&format!("Event stream error: {}", e));
                        return Err(e.into());
                    }
                    None => return Ok(()),
                }
            }
            _ = tokio::time::sleep(Duration::from_millis(250)) => {}
        }
    }
}
