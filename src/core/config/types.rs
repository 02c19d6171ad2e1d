//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs the client consumes.
//! Raw TOML deserialization types live in `raw.rs`.

use std::path::PathBuf;

/// Connection settings for one Egeria platform and view server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the OMAG server platform, e.g. `https://localhost:9443`.
    pub platform_url: String,
    /// View server hosting the OMVS endpoints.
    pub view_server: String,
    /// User id sent in token requests and platform-service URLs.
    pub user_id: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Verify the platform's TLS certificate.
    pub verify_tls: bool,
    /// Honour `HTTP(S)_PROXY` from the environment.
    pub use_proxy: bool,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_level: String,
    /// Append log output to this file instead of stderr (already expanded).
    pub log_file: Option<PathBuf>,
}

/// Defaults applied to requests when the caller does not override them.
#[derive(Debug, Clone)]
pub struct RequestDefaults {
    pub page_size: u32,
    /// Prefix for generated qualified names.
    pub local_qualifier: Option<String>,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub defaults: RequestDefaults,
    /// Password from `EGERIA_USER_PASSWORD`. Never sourced from TOML.
    pub user_password: Option<String>,
}

/// Values read from the process environment that override the file.
///
/// Kept as a plain struct so tests can pass overrides directly instead of
/// mutating env vars.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub platform_url: Option<String>,
    pub view_server: Option<String>,
    pub user_id: Option<String>,
    pub user_password: Option<String>,
    pub log_level: Option<String>,
    pub local_qualifier: Option<String>,
}
