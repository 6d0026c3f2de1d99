//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/desk-tools/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! currency = "R$"
//!
//! [ledger]
//! file = "~/Documents/expenses.csv"
//!
//! [password]
//! length = 16
//!
//! [organizer]
//! dry_run = false
//!
//! # Replaces the built-in table. Categories are tried alphabetically.
//! [organizer.categories]
//! Images = [".jpg", ".png"]
//! Ebooks = [".epub", ".mobi"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::organizer::{Category, default_categories};

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Currency symbol shown next to amounts (e.g. `"$"`, `"R$"`)
    pub currency: Option<String>,

    /// Expense ledger options
    #[serde(default)]
    pub ledger: FileLedgerConfig,

    /// Password generator options
    #[serde(default)]
    pub password: FilePasswordConfig,

    /// File organizer options
    #[serde(default)]
    pub organizer: FileOrganizerConfig,
}

/// Ledger options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileLedgerConfig {
    /// Path of the expense CSV file
    pub file: Option<PathBuf>,
}

/// Password options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FilePasswordConfig {
    /// Default password length
    pub length: Option<usize>,
}

/// Organizer options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileOrganizerConfig {
    /// Whether to only report what would be moved
    pub dry_run: Option<bool>,

    /// Category name to extension list; replaces the built-in table when set
    pub categories: Option<BTreeMap<String, Vec<String>>>,
}

impl FileOrganizerConfig {
    /// The category table to organize with.
    ///
    /// Uses the configured table when present and non-empty, otherwise the
    /// built-in one.
    #[must_use]
    pub fn category_table(&self) -> Vec<Category> {
        match &self.categories {
            Some(table) if !table.is_empty() => table
                .iter()
                .map(|(name, extensions)| Category::new(name.as_str(), extensions))
                .collect(),
            _ => default_categories(),
        }
    }
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
///
/// # Examples
///
/// ```
/// # use std::path::PathBuf;
/// # use desk_tools::config::file::expand_tilde;
/// let absolute = PathBuf::from("/absolute/path");
/// assert_eq!(expand_tilde(&absolute), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/desk-tools/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    ///
    /// # Returns
    ///
    /// `Some(PathBuf)` with the config file path, or `None` if the config
    /// directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("desk-tools").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    /// If the file exists but is malformed, returns an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file exists but cannot be read
    /// - The config file exists but contains invalid TOML or mistyped fields
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        tracing::debug!(path = %path.display(), "config file loaded");
        Ok(config)
    }
}
