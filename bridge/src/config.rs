//! Configuration for the bridge server.
//!
//! ```json
//! {
//!   "port": 8080,
//!   "host": "127.0.0.1",
//!   "sessionFile": "/var/lib/edupay/session.json",
//!   "providers": {
//!     "evm": { "rpc": "$EVM_WALLET_RPC" },
//!     "demo": { "connectLatencyMs": 1500 }
//!   }
//! }
//! ```

use clap::Parser;
use edupay::ProvidersConfig;
use serde::Deserialize;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Parser, Debug)]
#[command(name = "edupay-bridge")]
#[command(about = "HTTP bridge for the edupay wallet session")]
struct CliArgs {
    /// Path to the JSON configuration file [default: config.json]
    #[arg(long, short, env = "CONFIG")]
    config: Option<PathBuf>,
}

/// Server configuration.
///
/// `port` and `host` fall back to the `PORT` and `HOST` environment variables,
/// then to hardcoded defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "config_defaults::default_port")]
    port: u16,
    #[serde(default = "config_defaults::default_host")]
    host: IpAddr,
    /// Where the wallet session survives restarts. In memory when unset.
    #[serde(default)]
    session_file: Option<PathBuf>,
    #[serde(default)]
    providers: ProvidersConfig,
}

pub mod config_defaults {
    use std::env;
    use std::net::{IpAddr, Ipv4Addr};

    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

    /// `$PORT`, else 8080.
    pub fn default_port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT)
    }

    /// `$HOST`, else `0.0.0.0`.
    pub fn default_host() -> IpAddr {
        env::var("HOST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_HOST)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("Failed to parse config file: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: config_defaults::default_port(),
            host: config_defaults::default_host(),
            session_file: None,
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn session_file(&self) -> Option<&Path> {
        self.session_file.as_deref()
    }

    pub fn providers(&self) -> &ProvidersConfig {
        &self.providers
    }

    /// Loads the file named by `--config` (or `$CONFIG`).
    ///
    /// Without an explicit path, a missing `./config.json` yields the defaults:
    /// every wallet offered, none but the demo ledger installed.
    pub fn load() -> Result<Self, ConfigError> {
        let cli_args = CliArgs::parse();
        let path = match cli_args.config {
            Some(path) => path,
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };
        let config_path = path
            .canonicalize()
            .map_err(|e| ConfigError::FileRead(path, e))?;
        Self::load_from_path(config_path)
    }

    fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|e| ConfigError::FileRead(path, e))?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
