//! Configuration loading with env-var overrides.
//!
//! # Module layout
//!
//! - **types**: Public configuration structs (`Config`, `ServerConfig`, …).
//! - **raw**: Raw TOML deserialization types. These mirror the file shape
//!   and use serde defaults; kept private.
//! - **load**: Loading logic: `load`, `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{CONFIG_FILE_ENV, expand_home, load, load_from};
pub use types::*;

impl Config {
    /// Config pointing at `platform_url` with every other value defaulted.
    /// Proxies are disabled so local test servers are reached directly.
    pub fn for_platform(platform_url: &str) -> Self {
        Self {
            server: ServerConfig {
                platform_url: platform_url.trim_end_matches('/').to_string(),
                view_server: raw::default_view_server(),
                user_id: raw::default_user_id(),
                timeout_seconds: 5,
                verify_tls: false,
                use_proxy: false,
            },
            logging: LoggingConfig { log_level: raw::default_log_level(), log_file: None },
            defaults: RequestDefaults { page_size: 0, local_qualifier: None },
            user_password: None,
        }
    }
}
