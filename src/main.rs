mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use schaltwerk_selection::infrastructure::config::SelectionConfig;
use schaltwerk_selection::infrastructure::events::read_events;
use schaltwerk_selection::infrastructure::logging;
use schaltwerk_selection::{Selection, SelectionChange, SelectionController, SelectionSink};

struct PrintSink {
    json: bool,
}

impl SelectionSink for PrintSink {
    fn set_selection(&mut self, change: &SelectionChange) {
        if self.json {
            match serde_json::to_string(change) {
                Ok(line) => println!("{line}"),
                Err(e) => log::error!("Failed to serialize selection change: {e}"),
            }
            return;
        }

        let origin = if change.is_intentional { "user" } else { "auto" };
        match &change.selection {
            Selection::Root => println!("[{origin}] root"),
            Selection::Session { session_id } => {
                let state = change.session_state.map(|s| s.as_str()).unwrap_or("unknown");
                println!("[{origin}] session {session_id} ({state})");
            }
        }
    }
}

fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SelectionConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SelectionConfig::load().context("Failed to load selection config")?,
    };
    if let Some(filter) = cli.filter {
        config.default_filter = filter;
    }
    if let Some(sort) = cli.sort {
        config.default_sort = sort;
    }

    let events = read_events(&cli.events)
        .with_context(|| format!("Failed to read events from {}", cli.events.display()))?;

    let mut controller = SelectionController::with_config(&config, PrintSink { json: cli.json });
    let total = events.len();
    let changes = events
        .into_iter()
        .filter_map(|event| controller.handle_event(event))
        .count();

    log::info!("Replayed {total} events, {changes} selection changes");
    Ok(())
}
