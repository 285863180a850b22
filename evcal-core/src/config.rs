//! evcal configuration.
//!
//! Loaded from `~/.config/evcal/config.toml`, with `EVCAL_*` environment
//! variables layered on top (`EVCAL_SERVER__PORT=5000`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{EvcalError, EvcalResult};

/// Stock event color of the calendar view.
pub const DEFAULT_EVENT_COLOR: &str = "#3174ad";

pub const DEFAULT_PORT: u16 = 4180;

fn default_true() -> bool {
    true
}

fn default_event_color() -> String {
    DEFAULT_EVENT_COLOR.to_string()
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Validation and defaulting policy of an `EventStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Start with the three demo events.
    #[serde(default = "default_true")]
    pub seed_demo_events: bool,

    /// Background color for events that don't pick one.
    #[serde(default = "default_event_color")]
    pub default_color: String,

    /// Reject candidates without a category and a color.
    #[serde(default)]
    pub require_category_and_color: bool,

    /// Run the overlap check on edits, ignoring the edited event itself.
    #[serde(default = "default_true")]
    pub check_overlap_on_edit: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            seed_demo_events: true,
            default_color: default_event_color(),
            require_category_and_color: false,
            check_overlap_on_edit: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Base URL clients use to reach the server.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr())
    }
}

/// Global configuration at ~/.config/evcal/config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvcalConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl EvcalConfig {
    pub fn config_path() -> EvcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EvcalError::Config("Could not determine config directory".into()))?
            .join("evcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file (creating a commented-out default if missing) and
    /// apply environment overrides.
    pub fn load() -> EvcalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> EvcalResult<Self> {
        let config: EvcalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("EVCAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| EvcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EvcalError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Effective settings as TOML.
    pub fn to_toml(&self) -> EvcalResult<String> {
        toml::to_string_pretty(self).map_err(|e| EvcalError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EvcalResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EvcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, default_config_contents())
            .map_err(|e| EvcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn default_config_contents() -> String {
    format!(
        "\
# evcal configuration

[store]
# Start with the demo events:
# seed_demo_events = true

# Color for events that don't set one:
# default_color = \"{}\"

# Require category and color on every event:
# require_category_and_color = false

# Reject edits that would overlap another event:
# check_overlap_on_edit = true

[server]
# host = \"127.0.0.1\"
# port = {}
",
        DEFAULT_EVENT_COLOR, DEFAULT_PORT
    )
}
