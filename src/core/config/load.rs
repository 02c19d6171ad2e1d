//! Configuration loading with env-var overrides.
//!
//! Resolution order for every setting: environment variable, then the TOML
//! file, then the built-in default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::EgeriaError;

use super::raw::RawConfig;
use super::types::*;

pub const CONFIG_FILE_ENV: &str = "EGERIA_CONFIG_FILE";
const DEFAULT_CONFIG_PATH: &str = "config/egeria.toml";

impl EnvOverrides {
    /// Snapshot the `EGERIA_*` variables from the current process environment.
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            platform_url: var("EGERIA_PLATFORM_URL"),
            view_server: var("EGERIA_VIEW_SERVER"),
            user_id: var("EGERIA_USER"),
            user_password: var("EGERIA_USER_PASSWORD"),
            log_level: var("EGERIA_LOG_LEVEL"),
            local_qualifier: var("EGERIA_LOCAL_QUALIFIER"),
        }
    }
}

/// Load config from the given path, `$EGERIA_CONFIG_FILE`, or
/// `config/egeria.toml`, then apply env-var overrides.
/// When no file is named and the default path does not exist, the built-in
/// defaults are used.
pub fn load(config_path: Option<&str>) -> Result<Config, EgeriaError> {
    let overrides = EnvOverrides::from_env();

    let explicit = config_path
        .map(str::to_string)
        .or_else(|| env::var(CONFIG_FILE_ENV).ok().filter(|p| !p.is_empty()));

    match explicit {
        Some(path) => load_from(Some(&expand_home(&path)), &overrides),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_from(Some(default_path), &overrides)
            } else {
                load_from(None, &overrides)
            }
        }
    }
}

/// Internal loader: accepts an explicit path (or none) and overrides.
/// A named file that cannot be read is an error.
pub fn load_from(path: Option<&Path>, overrides: &EnvOverrides) -> Result<Config, EgeriaError> {
    let parsed = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| EgeriaError::Config(format!("cannot read {}: {e}", path.display())))?;
            toml::from_str::<RawConfig>(&raw)
                .map_err(|e| EgeriaError::Config(format!("parse error in {}: {e}", path.display())))?
        }
        None => RawConfig::default(),
    };

    let s = parsed.server;
    let pick = |over: &Option<String>, file: String| over.clone().unwrap_or(file);

    let server = ServerConfig {
        platform_url: pick(&overrides.platform_url, s.platform_url)
            .trim_end_matches('/')
            .to_string(),
        view_server: pick(&overrides.view_server, s.view_server),
        user_id: pick(&overrides.user_id, s.user_id),
        timeout_seconds: s.timeout_seconds.max(1),
        verify_tls: s.verify_tls,
        use_proxy: s.use_proxy,
    };

    if server.view_server.trim().is_empty() {
        return Err(EgeriaError::Config("server.view_server must not be empty".into()));
    }

    let logging = LoggingConfig {
        log_level: pick(&overrides.log_level, parsed.logging.log_level),
        log_file: parsed.logging.log_file.as_deref().map(expand_home),
    };

    let defaults = RequestDefaults {
        page_size: parsed.defaults.page_size,
        local_qualifier: overrides
            .local_qualifier
            .clone()
            .or(parsed.defaults.local_qualifier)
            .filter(|q| !q.trim().is_empty()),
    };

    Ok(Config {
        server,
        logging,
        defaults,
        user_password: overrides.user_password.clone(),
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
