//! Validated run configuration

use thiserror::Error;

use crate::core::tokenizer::Encoding;
use crate::inputs::stdin::StdinMode;

/// Default ceiling for a single file read (1 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 1_048_576;

/// Default tokenizer encoding name
pub const DEFAULT_ENCODING: &str = "cl100k_base";

/// Configuration problems that abort the run before any input is touched
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--max-bytes must be >= 0 (got {0})")]
    NegativeMaxBytes(i64),

    #[error("Unknown encoding: {name}. Available: {available}")]
    UnknownEncoding { name: String, available: String },

    #[error("Failed to load encoding {name}: {reason}")]
    EncodingUnavailable { name: String, reason: String },
}

/// Everything the pipeline needs, already validated
#[derive(Debug, Clone)]
pub struct Config {
    /// Positional inputs exactly as given (`-` means piped stdin as text)
    pub paths: Vec<String>,
    /// Explicit `--stdin` choice, if any
    pub stdin_mode: Option<StdinMode>,
    pub max_bytes: u64,
    pub encoding: Encoding,
    pub json: bool,
    pub fail_on_skip: bool,
    pub verbose: bool,
    pub color: bool,
}

impl Config {
    /// Check a raw `--max-bytes` value
    pub fn parse_max_bytes(raw: i64) -> Result<u64, ConfigError> {
        u64::try_from(raw).map_err(|_| ConfigError::NegativeMaxBytes(raw))
    }

    /// Stdin mode after defaulting: `auto` without positionals, `ignore` with them
    pub fn resolved_stdin_mode(&self) -> StdinMode {
        match self.stdin_mode {
            Some(mode) => mode,
            None if self.paths.is_empty() => StdinMode::Auto,
            None => StdinMode::Ignore,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            stdin_mode: None,
            max_bytes: DEFAULT_MAX_BYTES,
            encoding: Encoding::default(),
            json: false,
            fail_on_skip: false,
            verbose: false,
            color: false,
        }
    }
}
