//! nccr-review - terminal dashboard for reviewing submitted carbon credit projects
//!
//! Uses the Component Architecture pattern from ratatui: components turn
//! key presses into Actions, the App applies them, then everything redraws.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "nccr-review", version, about = "Review submitted carbon credit projects")]
struct Cli {
    /// Project list file (.json, .yaml or .yml)
    #[arg(short, long)]
    projects: Option<PathBuf>,

    /// Directory for CSV exports
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Terminal width below which projects are shown as cards
    #[arg(long)]
    breakpoint: Option<u16>,

    /// Persist the resulting settings to the config file
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    /// Overlay command line flags on the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(path) = &self.projects {
            config.projects_path = path.to_string_lossy().to_string();
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = dir.to_string_lossy().to_string();
        }
        if let Some(width) = self.breakpoint {
            config.card_breakpoint = width;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging must be up before any tracing calls
    if let Some(logs_dir) = Config::logs_dir() {
        match logging::init_file_logging(&logs_dir) {
            Ok(path) => tracing::info!("Logging to: {}", path.display()),
            Err(e) => eprintln!("Warning: file logging disabled: {:#}", e),
        }
    }

    let config = cli.apply(Config::load().unwrap_or_default());
    if cli.save_config {
        config.save()?;
        tracing::info!("Saved config");
    }

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(250));
    tui.enter()?;

    let mut app = App::new(&config);
    let result = app.init().and_then(|_| run_app(&mut tui, &mut app));

    tui.exit()?;

    if let Err(err) = result {
        tracing::error!("Fatal: {:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            let area = frame.area();
            if let Err(e) = app.draw(frame, area) {
                tracing::error!("Draw error: {}", e);
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // An action may chain into a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
