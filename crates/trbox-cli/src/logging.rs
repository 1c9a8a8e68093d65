//! Subscriber setup for the `trbox` binary.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const TRACE_ENV: &str = "TRBOX_TRACE";
const FORMAT_ENV: &str = "TRBOX_LOG_FORMAT";
const FILE_ENV: &str = "TRBOX_LOG_FILE";

type BoxError = Box<dyn std::error::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, BoxError> {
        if value.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(format!("Invalid {FORMAT_ENV} '{value}' (expected 'json' or 'pretty')").into())
        }
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, BoxError> {
    if level.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(level).map_err(|err| format!("Invalid log filter: {err}").into())
    }
}

fn open_log_file(path: &str) -> Result<File, BoxError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| format!("Failed to open log file: {err}").into())
}

/// Install the global subscriber.
///
/// `level` wins over `TRBOX_TRACE`; with neither set logging stays off.
/// `TRBOX_LOG_FORMAT` picks `pretty` (default) or `json`, and
/// `TRBOX_LOG_FILE` adds a second sink. Returns false when a subscriber is
/// already installed.
pub fn init_logging(level: Option<&str>) -> Result<bool, BoxError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level = level
        .map(str::to_string)
        .or_else(|| env::var(TRACE_ENV).ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = build_filter(&level)?;
    let format = LogFormat::parse(&env::var(FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string()))?;
    let log_file = env::var(FILE_ENV)
        .ok()
        .map(|path| open_log_file(&path))
        .transpose()?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(fmt::layer().with_writer(io::stderr).json())
            .with(log_file.map(|file| fmt::layer().with_writer(file).with_ansi(false).json()))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(io::stderr).pretty())
            .with(log_file.map(|file| fmt::layer().with_writer(file).with_ansi(false).pretty()))
            .try_init(),
    };
    installed.map_err(|err| format!("Failed to initialize logging: {err}"))?;
    Ok(true)
}
