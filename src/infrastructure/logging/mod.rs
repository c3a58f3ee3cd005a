use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

static LOG_FILE_WRITER: Mutex<Option<BufWriter<File>>> = Mutex::new(None);
static LOGGER_INITIALIZED: Mutex<bool> = Mutex::new(false);

const DEFAULT_RETENTION_HOURS: u64 = 72;
const SECONDS_PER_HOUR: u64 = 3_600;

#[derive(Debug)]
struct LoggingConfig {
    file_logging_enabled: bool,
    retention: Duration,
    log_dir: PathBuf,
    deferred_warnings: Vec<String>,
}

pub fn get_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("schaltwerk")
        .join("logs")
}

/// Console logging always; file logging when enabled. Safe to call more
/// than once.
pub fn init_logging() {
    {
        let Ok(mut initialized) = LOGGER_INITIALIZED.lock() else {
            return;
        };
        if *initialized {
            return;
        }
        *initialized = true;
    }

    let mut config = resolve_logging_config();
    let log_path = if config.file_logging_enabled {
        open_log_file(&mut config)
    } else {
        None
    };

    let mut builder = Builder::new();
    if cfg!(test) {
        builder.is_test(true);
    }

    if let Ok(rust_log) = env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    } else if config.file_logging_enabled {
        builder.filter_module("schaltwerk_selection", LevelFilter::Debug);
        builder.filter_level(LevelFilter::Warn);
    } else {
        builder.filter_level(LevelFilter::Warn);
    }

    builder.format(move |buf, record| {
        let log_line = format_line(record.level(), record.target(), &record.args().to_string());
        writeln!(buf, "{log_line}")?;

        if let Ok(mut guard) = LOG_FILE_WRITER.lock() {
            if let Some(ref mut writer) = *guard {
                let _ = writeln!(writer, "{log_line}");
                let _ = writer.flush();
            }
        }

        Ok(())
    });
    builder.target(env_logger::Target::Stderr);

    if builder.try_init().is_err() {
        // Someone else installed a logger first; keep theirs.
        return;
    }

    log::info!("Schaltwerk selection v{} starting", env!("CARGO_PKG_VERSION"));
    match log_path {
        Some(path) => log::info!("Log file: {}", path.display()),
        None => log::info!("File logging disabled. Console logging set to WARN by default."),
    }

    for warning in config.deferred_warnings {
        log::warn!("{warning}");
    }
}

fn open_log_file(config: &mut LoggingConfig) -> Option<PathBuf> {
    if let Err(e) = fs::create_dir_all(&config.log_dir) {
        config.deferred_warnings.push(format!(
            "Failed to create log directory {}: {e}",
            config.log_dir.display()
        ));
        return None;
    }

    let cleanup_warnings = cleanup_old_logs(&config.log_dir, config.retention);
    config.deferred_warnings.extend(cleanup_warnings);

    let candidate = config.log_dir.join(format!(
        "{LOG_FILE_PREFIX}{}.log",
        Local::now().format("%Y%m%d-%H%M%S")
    ));

    match OpenOptions::new().create(true).append(true).open(&candidate) {
        Ok(file) => {
            if let Ok(mut guard) = LOG_FILE_WRITER.lock() {
                *guard = Some(BufWriter::new(file));
            }
            Some(candidate)
        }
        Err(e) => {
            config.deferred_warnings.push(format!(
                "Failed to open log file {}: {e}. Continuing with console logging only.",
                candidate.display()
            ));
            None
        }
    }
}

fn format_line(level: log::Level, target: &str, message: &str) -> String {
    let level_str = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    format!(
        "[{} {} {}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        level_str,
        target,
        message
    )
}

const LOG_FILE_PREFIX: &str = "selection-";

fn resolve_logging_config() -> LoggingConfig {
    LoggingConfig::from_values(
        env::var("SCHALTWERK_ENABLE_LOGS").ok().as_deref(),
        env::var("SCHALTWERK_LOG_RETENTION_HOURS").ok().as_deref(),
        get_log_dir(),
    )
}

impl LoggingConfig {
    fn from_values(enable_logs: Option<&str>, retention_hours: Option<&str>, log_dir: PathBuf) -> Self {
        let mut deferred_warnings = Vec::new();

        let default_enabled = cfg!(debug_assertions);
        let file_logging_enabled = enable_logs.map_or(default_enabled, |value| {
            parse_bool(value).unwrap_or_else(|| {
                deferred_warnings.push(format!(
                    "Ignoring SCHALTWERK_ENABLE_LOGS='{value}' (not a boolean); file logging stays {}",
                    if default_enabled { "on" } else { "off" }
                ));
                default_enabled
            })
        });

        let hours = retention_hours.map_or(DEFAULT_RETENTION_HOURS, |value| {
            value.trim().parse::<u64>().unwrap_or_else(|_| {
                deferred_warnings.push(format!(
                    "Ignoring SCHALTWERK_LOG_RETENTION_HOURS='{value}'; keeping selection logs for {DEFAULT_RETENTION_HOURS}h"
                ));
                DEFAULT_RETENTION_HOURS
            })
        });

        Self {
            file_logging_enabled,
            retention: Duration::from_secs(hours.saturating_mul(SECONDS_PER_HOUR)),
            log_dir,
            deferred_warnings,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn is_selection_log(path: &Path) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(".log"))
}

/// Prunes this tool's own log files older than `retention`. The directory is
/// shared with the desktop app, so other logs are never touched. A zero
/// retention keeps everything.
fn cleanup_old_logs(log_dir: &Path, retention: Duration) -> Vec<String> {
    let Some(cutoff) = SystemTime::now()
        .checked_sub(retention)
        .filter(|_| !retention.is_zero())
    else {
        return Vec::new();
    };
    let Ok(entries) = fs::read_dir(log_dir) else {
        return Vec::new();
    };

    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| is_selection_log(path))
        .filter_map(|path| {
            let modified = match fs::metadata(&path).and_then(|meta| meta.modified()) {
                Ok(modified) => modified,
                Err(e) => return Some(format!("Cannot read age of {}: {e}", path.display())),
            };
            if modified >= cutoff {
                return None;
            }
            fs::remove_file(&path)
                .err()
                .map(|e| format!("Could not prune {}: {e}", path.display()))
        })
        .collect()
}
