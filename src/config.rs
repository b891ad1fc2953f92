//! Punchclock configuration.
//!
//! Loaded from `~/.punchclock/config.toml`. A missing file means defaults; a
//! file that is present must parse.
//!
//! ```toml
//! data-dir = "/srv/punchclock"
//!
//! [timing]
//! notification-ms = 3000
//! search-demo-ms = 1000
//! try-advance-ms = 1500
//!
//! [viewport]
//! width = 1280
//! height = 800
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::Viewport;
use crate::onboarding::Timing;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHome,

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("viewport must be at least 1x1, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
}

pub type Result<T> = core::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Storage root. Defaults to `~/.punchclock/`.
    pub data_dir: Option<PathBuf>,
    pub timing: TimingConfig,
    pub viewport: ViewportConfig,
}

/// Onboarding delays, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TimingConfig {
    pub notification_ms: u64,
    pub search_demo_ms: u64,
    pub try_advance_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_ms: 3000,
            search_demo_ms: 1000,
            try_advance_ms: 1500,
        }
    }
}

/// Size of the simulated dashboard window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

impl Config {
    /// Load config from `~/.punchclock/config.toml`.
    pub fn load() -> Result<Self> {
        let path = Self::path().ok_or(ConfigError::NoHome)?;
        Self::load_from(&path)
    }

    /// Load config from `<home>/config.toml` when a home override is given,
    /// otherwise from the default location.
    pub fn load_in(home: Option<&Path>) -> Result<Self> {
        match home {
            Some(home) => Self::load_from(&home.join(CONFIG_FILE)),
            None => Self::load(),
        }
    }

    /// Load config from `path`, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let ViewportConfig { width, height } = config.viewport;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyViewport { width, height });
        }

        Ok(config)
    }

    /// The config file path: `~/.punchclock/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".punchclock").join(CONFIG_FILE))
    }

    pub fn timing(&self) -> Timing {
        Timing {
            notification: Duration::from_millis(self.timing.notification_ms),
            search_demo: Duration::from_millis(self.timing.search_demo_ms),
            try_advance: Duration::from_millis(self.timing.try_advance_ms),
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            f64::from(self.viewport.width),
            f64::from(self.viewport.height),
        )
    }
}
