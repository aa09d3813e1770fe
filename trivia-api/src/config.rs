//! Process configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config trivia.toml`)
//! 3. `TRIVIA_LISTEN`, `TRIVIA_DATABASE`, `TRIVIA_PAGE_SIZE`, `TRIVIA_MAX_BODY_SIZE`
//! 4. Command-line flags, applied by the binary
//!
//! ```toml
//! listen = "0.0.0.0:8080"
//! database = "/var/lib/trivia/trivia.db"
//! page_size = 10
//! max_body_size = 1048576
//! seed = true
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::DEFAULT_MAX_BODY_SIZE;

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::exhaustive_structs)] // plain settings record, built literally by callers
pub struct Config {
    /// Address the HTTP server binds.
    pub listen: SocketAddr,
    /// SQLite database file.
    pub database: PathBuf,
    /// Questions per page.
    pub page_size: usize,
    /// Largest accepted request body in bytes.
    pub max_body_size: usize,
    /// Insert the default categories into an empty database.
    pub seed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 5000)),
            database: PathBuf::from("trivia.db"),
            page_size: trivia_core::QUESTIONS_PER_PAGE,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            seed: true,
        }
    }
}

/// Why configuration could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The config file could not be read.
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        message: String,
    },
    /// The config file is not valid TOML for [`Config`].
    Parse {
        /// Parser message
        message: String,
    },
    /// A setting has an unusable value.
    Invalid {
        /// Setting name, as in the TOML file or environment
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "cannot read config {}: {message}", path.display())
            },
            Self::Parse { message } => write!(f, "invalid config: {message}"),
            Self::Invalid { field, message } => write!(f, "invalid {field}: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Parse TOML. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Defaults, overlaid with `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply `TRIVIA_*` variables from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Apply `TRIVIA_*` variables read through `lookup`.
    pub fn apply_env_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(listen) = lookup("TRIVIA_LISTEN") {
            self.listen = listen
                .parse()
                .map_err(|e| ConfigError::invalid("TRIVIA_LISTEN", format!("{listen:?}: {e}")))?;
        }
        if let Some(database) = lookup("TRIVIA_DATABASE") {
            self.database = PathBuf::from(database);
        }
        if let Some(size) = lookup("TRIVIA_PAGE_SIZE") {
            self.page_size = parse_size("TRIVIA_PAGE_SIZE", &size)?;
        }
        if let Some(size) = lookup("TRIVIA_MAX_BODY_SIZE") {
            self.max_body_size = parse_size("TRIVIA_MAX_BODY_SIZE", &size)?;
        }
        Ok(())
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::invalid("page_size", "must be at least 1"));
        }
        if self.max_body_size == 0 {
            return Err(ConfigError::invalid("max_body_size", "must be at least 1"));
        }
        Ok(())
    }
}

fn parse_size(field: &str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::invalid(field, format!("{raw:?}: {e}")))
}
