//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after configuration is resolved.

use std::env;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::core::config::LoggingConfig;
use crate::core::error::EgeriaError;

/// HTTP plumbing is chatty at debug; these targets stay at warn unless the
/// filter names them.
const DEPENDENCY_DIRECTIVES: &[(&str, &str)] = &[("hyper_util", "hyper_util=warn"), ("rustls", "rustls=warn")];

/// Initialise the global tracing subscriber.
///
/// `cli_level`, when given, takes precedence over both `RUST_LOG` and the
/// configured level. Otherwise `RUST_LOG` wins and `config.log_level` is the
/// fallback.
pub fn init(config: &LoggingConfig, cli_level: Option<&str>) -> Result<(), EgeriaError> {
    let filter = match cli_level {
        Some(level) => build_filter(level)?,
        None => match env::var(EnvFilter::DEFAULT_ENV).ok().filter(|v| !v.trim().is_empty()) {
            Some(spec) => build_filter(&spec).or_else(|_| build_filter(&config.log_level))?,
            None => build_filter(&config.log_level)?,
        },
    };

    let writer = match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    EgeriaError::Logger(format!("failed to open log file '{}': {e}", path.display()))
                })?;
            BoxMakeWriter::new(file)
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.log_file.is_none())
        .try_init()
        .map_err(|e| EgeriaError::Logger(format!("failed to set subscriber: {e}")))?;

    Ok(())
}

/// Filter from a directive string, plus the quiet dependency directives for
/// every target the string leaves unnamed.
fn build_filter(spec: &str) -> Result<EnvFilter, EgeriaError> {
    let mut filter = EnvFilter::try_new(spec)
        .map_err(|e| EgeriaError::Logger(format!("invalid log level '{spec}': {e}")))?;
    for (target, directive) in DEPENDENCY_DIRECTIVES {
        if names_target(spec, target) {
            continue;
        }
        if let Ok(d) = directive.parse() {
            filter = filter.add_directive(d);
        }
    }
    Ok(filter)
}

fn names_target(spec: &str, target: &str) -> bool {
    spec.split(',')
        .filter_map(|directive| directive.split_once('=').map(|(lhs, _)| lhs))
        .map(|lhs| lhs.split('[').next().unwrap_or(lhs).trim())
        .any(|t| t == target || t.strip_prefix(target).is_some_and(|rest| rest.starts_with("::")))
}

/// Parse a log level string into a [`LevelFilter`], returning an error on
/// unrecognised values. Used to validate `--log-level` before init.
pub fn parse_level(level: &str) -> Result<LevelFilter, EgeriaError> {
    if level.is_empty() {
        return Err(EgeriaError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| EgeriaError::Logger(format!("unrecognised log level: '{level}'")))
}
