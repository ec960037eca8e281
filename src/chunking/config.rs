//! Word-count thresholds and their file/environment layering.
//!
//! Thresholds are resolved in the following order (later wins):
//!
//! 1. Compiled defaults (the production values 300/500/200)
//! 2. Config file (`.yaml`, `.toml`, or `.json`)
//! 3. Environment variables (`CHUNKMILL_*`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use chunkmill::chunking::PolicyBuilder;
//!
//! let policy = PolicyBuilder::new()
//!     .with_file("config/chunking.toml")?
//!     .with_env()
//!     .build()?;
//!
//! assert!(policy.min_words <= policy.max_words);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Errors that can occur while loading a chunk policy
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file at {path}: {source}")]
    FileRead {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to parse the configuration
    #[error("failed to parse {format} config: {source}")]
    ParseError {
        /// Format that failed to parse (YAML, TOML, JSON)
        format: String,
        /// Underlying parse error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Unsupported or unrecognised configuration file extension
    #[error("unsupported config file format: {message}")]
    UnsupportedFormat {
        /// Description of the problem
        message: String,
    },

    /// Threshold validation failed
    #[error("policy validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("failed to parse environment variable {key}: {message}")]
    EnvParse {
        /// Environment variable key
        key: String,
        /// Error message
        message: String,
    },
}

/// Word-count thresholds steering the chunking walk.
///
/// The ordering `min_final_words <= min_words <= max_words` is enforced at
/// validation. Under it, a document thinner than `min_final_words` always
/// comes back as exactly one chunk, and the trailing-remainder merge never
/// fires on a chunk the walk would have been willing to close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_ordering))]
pub struct ChunkPolicy {
    /// Smallest chunk the walk will close at a section or budget boundary.
    #[validate(range(min = 1))]
    pub min_words: usize,

    /// Upper budget; chunks past it are recursively re-split.
    #[validate(range(min = 1))]
    pub max_words: usize,

    /// Width under which a trailing remainder merges into the previous
    /// chunk instead of standing alone.
    #[validate(range(min = 1))]
    pub min_final_words: usize,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            min_words: 300,
            max_words: 500,
            min_final_words: 200,
        }
    }
}

fn validate_ordering(policy: &ChunkPolicy) -> Result<(), ValidationError> {
    if policy.min_final_words > policy.min_words {
        return Err(ValidationError::new(
            "min_final_words must not exceed min_words",
        ));
    }
    if policy.min_words > policy.max_words {
        return Err(ValidationError::new("min_words must not exceed max_words"));
    }
    Ok(())
}

/// Builder layering a [`ChunkPolicy`] from defaults, a file, and the
/// environment
#[derive(Debug, Default)]
pub struct PolicyBuilder {
    base: ChunkPolicy,
    file_path: Option<PathBuf>,
    use_env: bool,
}

impl PolicyBuilder {
    /// Create a new builder holding the compiled defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: ChunkPolicy::default(),
            file_path: None,
            use_env: false,
        }
    }

    /// Load thresholds from a configuration file (YAML, TOML, or JSON)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        self.file_path = Some(path.to_path_buf());

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let policy: ChunkPolicy = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    format: "YAML".to_string(),
                    source: Box::new(e),
                })?
            }
            Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                format: "TOML".to_string(),
                source: Box::new(e),
            })?,
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                    format: "JSON".to_string(),
                    source: Box::new(e),
                })?
            }
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    message: "file extension must be .yaml, .yml, .toml, or .json".to_string(),
                });
            }
        };

        self.base = policy;
        Ok(self)
    }

    /// Enable loading overrides from environment variables
    ///
    /// Looks for `CHUNKMILL_MIN_WORDS`, `CHUNKMILL_MAX_WORDS`, and
    /// `CHUNKMILL_MIN_FINAL_WORDS`. A `.env` file is honoured when present.
    #[must_use]
    pub fn with_env(mut self) -> Self {
        self.use_env = true;
        self
    }

    /// Build the final policy
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation fails or environment variables
    /// are invalid
    pub fn build(mut self) -> Result<ChunkPolicy, ConfigError> {
        if self.use_env {
            dotenvy::dotenv().ok();

            apply_env("CHUNKMILL_MIN_WORDS", &mut self.base.min_words)?;
            apply_env("CHUNKMILL_MAX_WORDS", &mut self.base.max_words)?;
            apply_env("CHUNKMILL_MIN_FINAL_WORDS", &mut self.base.min_final_words)?;
        }

        self.base.validate()?;

        Ok(self.base)
    }
}

fn apply_env(key: &str, slot: &mut usize) -> Result<(), ConfigError> {
    if let Ok(value) = std::env::var(key) {
        *slot = value.parse().map_err(|_| ConfigError::EnvParse {
            key: key.to_string(),
            message: "must be a positive integer".to_string(),
        })?;
    }
    Ok(())
}
