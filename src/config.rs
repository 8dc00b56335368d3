//! Service configuration.
//!
//! Configuration is loaded from (in order of precedence):
//! 1. Environment variables (RSA_LAB_*)
//! 2. Config file (./rsa-lab.toml)
//! 3. Default values

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Name of the optional config file in the working directory.
pub const CONFIG_FILE: &str = "rsa-lab.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "RSA_LAB_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTML page served at `/`.
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Enable permissive CORS.
    #[serde(default = "default_cors")]
    pub cors: bool,

    /// Log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub json_logs: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    3000
}

fn default_index_path() -> PathBuf {
    PathBuf::from("static/index.html")
}

fn default_cors() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            index_path: default_index_path(),
            cors: default_cors(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

impl Config {
    /// Loads configuration from all sources, falling back to defaults on error.
    pub fn load() -> Self {
        match Self::figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                // Logging is not up yet
                eprintln!("Warning: configuration error, using defaults");
                eprintln!("  Config file: {CONFIG_FILE}");
                eprintln!("  Error: {e}");
                Config::default()
            }
        }
    }

    /// The layered provider stack behind [`Config::load`].
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
