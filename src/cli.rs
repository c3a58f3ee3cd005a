use clap::Parser;
use schaltwerk_selection::{FilterMode, SortMode};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Replays recorded sidebar events and prints every selection change
#[derive(Debug, Parser)]
#[command(
    name = "schaltwerk-selection",
    about = "Replays recorded sidebar events and prints every selection change",
    version = VERSION,
    help_template = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}

EXAMPLES:
    schaltwerk-selection events.json                    # Replay with configured defaults
    schaltwerk-selection events.json --filter reviewed  # Start in the reviewed filter
    schaltwerk-selection events.json --json             # Emit JSON lines
"
)]
pub struct Cli {
    /// JSON file holding an array of events to replay.
    #[arg(value_name = "EVENTS")]
    pub events: PathBuf,

    /// Config file to use instead of the one in the user config directory.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Initial filter: all, spec, running or reviewed.
    #[arg(long, value_parser = parse_filter)]
    pub filter: Option<FilterMode>,

    /// Initial sort: name, created or last-edited.
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortMode>,

    /// Print each change as a JSON line.
    #[arg(long)]
    pub json: bool,
}

fn parse_filter(value: &str) -> Result<FilterMode, String> {
    value.parse()
}

fn parse_sort(value: &str) -> Result<SortMode, String> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString>,
    {
        let iter = std::iter::once(std::ffi::OsString::from("schaltwerk-selection"))
            .chain(itr.into_iter().map(Into::into));
        Cli::try_parse_from(iter)
    }

    #[test]
    fn parses_events_path_only() {
        let cli = parse_from(["events.json"]).unwrap();
        assert_eq!(cli.events, PathBuf::from("events.json"));
        assert!(cli.config.is_none());
        assert!(cli.filter.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn parses_filter_and_sort() {
        let cli = parse_from(["events.json", "--filter", "reviewed", "--sort", "last-edited", "--json"])
            .unwrap();
        assert_eq!(cli.filter, Some(FilterMode::Reviewed));
        assert_eq!(cli.sort, Some(SortMode::LastEdited));
        assert!(cli.json);
    }

    #[test]
    fn rejects_unknown_filter() {
        assert!(parse_from(["events.json", "--filter", "pending"]).is_err());
    }

    #[test]
    fn requires_events_path() {
        assert!(parse_from::<[&str; 0], &str>([]).is_err());
    }

    #[test]
    fn help_template_contains_examples() {
        use clap::CommandFactory;
        let mut cmd = Cli::command();
        let help = cmd.render_help().to_string();
        assert!(help.contains("EXAMPLES:"));
        assert!(help.contains("--filter reviewed"));
    }
}
