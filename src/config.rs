//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file: `--config <FILE>` if given, else `dirdupes.toml` in the
//!    platform config directory (skipped when absent)
//! 3. `DIRDUPES_*` environment variables (e.g. `DIRDUPES_OUTPUT=json`)
//! 4. Command-line flags
//!
//! # Example file
//!
//! ```toml
//! output = "rows"
//! order = "count"
//! duplicates_only = true
//! on_error = "skip"
//! parallel = false
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::ScanArgs;
use crate::duplicates::GroupOrder;
use crate::output::OutputFormat;
use crate::scanner::{ErrorPolicy, ScanConfig};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DIRDUPES_";

/// Name of the config file looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "dirdupes.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// A layer contained an invalid value.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Scan and output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Report format.
    pub output: OutputFormat,
    /// Group order in the report.
    pub order: GroupOrder,
    /// Hide groups with a single path.
    pub duplicates_only: bool,
    /// Policy for unreadable entries below the root.
    pub on_error: ErrorPolicy,
    /// Read contents on the rayon pool.
    pub parallel: bool,
}

impl Settings {
    /// Load settings from defaults, a config file and the environment.
    ///
    /// With `explicit` set, that file must exist. Without it, the
    /// platform-specific `dirdupes.toml` is used if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit file is missing or any layer
    /// holds an invalid value.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => Self::config_path().filter(|p| p.exists()),
        };

        if let Some(ref path) = file {
            log::debug!("Loading config from {}", path.display());
        }
        Self::from_sources(file.as_deref())
    }

    /// Merge defaults, an optional TOML file and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if any layer holds an invalid value.
    pub fn from_sources(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Apply command-line overrides.
    ///
    /// Options left unset on the command line keep their layered value;
    /// boolean flags can only switch a setting on.
    #[must_use]
    pub fn with_scan_args(mut self, args: &ScanArgs) -> Self {
        if let Some(output) = args.output {
            self.output = output;
        }
        if let Some(order) = args.order {
            self.order = order;
        }
        if let Some(policy) = args.on_error {
            self.on_error = policy;
        }
        self.duplicates_only |= args.duplicates_only;
        self.parallel |= args.parallel;
        self
    }

    /// Scanner configuration derived from these settings.
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::default()
            .with_error_policy(self.on_error)
            .with_parallel(self.parallel)
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dirdupes", "dirdupes")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
