//! Raw TOML deserialization types.
//!
//! These structs mirror the TOML file shape and use `serde` defaults, so a
//! file only has to name the keys it changes. The `load` module converts them
//! into the public `types` structs.

use serde::Deserialize;

// ── Top-level ────────────────────────────────────────────────────────────────

/// Raw TOML shape: serde target before resolution.
#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub server: RawServer,
    #[serde(default)]
    pub logging: RawLogging,
    #[serde(default)]
    pub defaults: RawDefaults,
}

// ── Server ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawServer {
    #[serde(default = "default_platform_url")]
    pub platform_url: String,
    #[serde(default = "default_view_server")]
    pub view_server: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Egeria development platforms ship self-signed certificates, so TLS
    /// verification is opt-in.
    #[serde(default = "default_false")]
    pub verify_tls: bool,
    #[serde(default = "default_true")]
    pub use_proxy: bool,
}

impl Default for RawServer {
    fn default() -> Self {
        Self {
            platform_url: default_platform_url(),
            view_server: default_view_server(),
            user_id: default_user_id(),
            timeout_seconds: default_timeout_seconds(),
            verify_tls: false,
            use_proxy: true,
        }
    }
}

// ── Logging ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct RawLogging {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for RawLogging {
    fn default() -> Self {
        Self { log_level: default_log_level(), log_file: None }
    }
}

// ── Request defaults ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub(super) struct RawDefaults {
    /// `0` asks the server for its own maximum page size.
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub local_qualifier: Option<String>,
}

pub(super) fn default_platform_url() -> String { "https://localhost:9443".to_string() }
pub(super) fn default_view_server() -> String { "qs-view-server".to_string() }
pub(super) fn default_user_id() -> String { "erinoverview".to_string() }
pub(super) fn default_timeout_seconds() -> u64 { 30 }
pub(super) fn default_log_level() -> String { "info".to_string() }

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}
