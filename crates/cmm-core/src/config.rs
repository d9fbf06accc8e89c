//! Configuration types for cmm.
//!
//! [`Config::load`] layers, lowest precedence first: the embedded defaults,
//! `~/.config/cmm/config.toml` (or an explicit path), `CMM_`-prefixed
//! environment variables, and finally the dedicated `DATA_SERVER_FILE` feed
//! URL override. It is called once at startup and the result is passed down
//! by value. [`Config::defaults`] returns the embedded defaults without
//! touching the filesystem or the environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

/// Feed endpoint used when nothing overrides it.
pub const DEFAULT_FEED_URL: &str =
    "http://143.110.186.187:3000/data_viewer.html?file=3C8A1F8053AC_282E39C0000000F5.txt";

/// Environment variable that overrides only the feed URL.
pub const FEED_URL_ENV: &str = "DATA_SERVER_FILE";

/// Prefix for environment overrides of any key, e.g. `CMM_SERVER__BIND`.
pub const ENV_PREFIX: &str = "CMM";

const DEFAULT_CONFIG: &str = r#"
[feed]
url          = "http://143.110.186.187:3000/data_viewer.html?file=3C8A1F8053AC_282E39C0000000F5.txt"
timeout_secs = 10

[server]
bind = "127.0.0.1:3000"

[poll]
interval_secs = 15

[maturity]
datum_c           = -10.0
activation_energy = 33500.0
reference_c       = 20.0
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub maturity: MaturityConfig,
}

/// `[feed]` section — where the telemetry text lives and how long to wait.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_feed_url() -> String { DEFAULT_FEED_URL.to_string() }
fn default_timeout_secs() -> u64 { 10 }

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String { "127.0.0.1:3000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

/// `[poll]` section — refresh cadence for polling consumers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 { 15 }

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// `[maturity]` section — constants of the maturity functions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MaturityConfig {
    /// Nurse-Saul datum temperature, °C.
    #[serde(default = "default_datum_c")]
    pub datum_c: f64,
    /// Arrhenius activation energy, J/mol.
    #[serde(default = "default_activation_energy")]
    pub activation_energy: f64,
    /// Arrhenius reference temperature, °C.
    #[serde(default = "default_reference_c")]
    pub reference_c: f64,
}

fn default_datum_c() -> f64 { -10.0 }
fn default_activation_energy() -> f64 { 33_500.0 }
fn default_reference_c() -> f64 { 20.0 }

impl Default for MaturityConfig {
    fn default() -> Self {
        Self {
            datum_c: default_datum_c(),
            activation_energy: default_activation_energy(),
            reference_c: default_reference_c(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from the default config path layered on top of the built-in
    /// defaults, then apply environment overrides. A missing file is fine.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Like [`Config::load`] with an explicit config file path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut config: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.apply_feed_override(std::env::var(FEED_URL_ENV).ok());
        Ok(config)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Replace the feed URL when an override is present and non-empty.
    pub fn apply_feed_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.feed.url = url;
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/cmm/config.toml`, falling back to `~/.config`.
pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("cmm")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
