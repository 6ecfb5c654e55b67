//! Token counting module - tiktoken encodings behind a small capability trait
//!
//! Supported encodings:
//! - cl100k_base (GPT-4, GPT-3.5-turbo; default)
//! - o200k_base (GPT-4o)
//! - p50k_base, p50k_edit (Codex / text-davinci)
//! - r50k_base (GPT-3, also known as gpt2)
//!
//! Each BPE table is loaded lazily on first use and shared for the rest of the run.

use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use tiktoken_rs::{cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base, CoreBPE};

use crate::core::config::ConfigError;

/// Something that turns text into a token count
pub trait TokenCounter {
    fn count(&self, text: &str) -> usize;
}

/// Supported tiktoken encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Cl100kBase,
    O200kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

impl Encoding {
    /// Canonical encoding names, in display order
    pub fn available() -> &'static [&'static str] {
        &["cl100k_base", "o200k_base", "p50k_base", "p50k_edit", "r50k_base"]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::O200kBase => "o200k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::P50kEdit => "p50k_edit",
            Encoding::R50kBase => "r50k_base",
        }
    }

    fn bpe(&self) -> &'static Result<CoreBPE, String> {
        match self {
            Encoding::Cl100kBase => &*CL100K_BPE,
            Encoding::O200kBase => &*O200K_BPE,
            Encoding::P50kBase => &*P50K_BPE,
            Encoding::P50kEdit => &*P50K_EDIT_BPE,
            Encoding::R50kBase => &*R50K_BPE,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cl100k_base" | "cl100k" => Ok(Encoding::Cl100kBase),
            "o200k_base" | "o200k" => Ok(Encoding::O200kBase),
            "p50k_base" | "p50k" => Ok(Encoding::P50kBase),
            "p50k_edit" => Ok(Encoding::P50kEdit),
            "r50k_base" | "r50k" | "gpt2" => Ok(Encoding::R50kBase),
            _ => Err(ConfigError::UnknownEncoding {
                name: s.to_string(),
                available: Encoding::available().join(", "),
            }),
        }
    }
}

// Lazy-initialized BPE tables (loaded once on first use)
static CL100K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| cl100k_base().map_err(|e| e.to_string()));
static O200K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| o200k_base().map_err(|e| e.to_string()));
static P50K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| p50k_base().map_err(|e| e.to_string()));
static P50K_EDIT_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| p50k_edit().map_err(|e| e.to_string()));
static R50K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| r50k_base().map_err(|e| e.to_string()));

/// A loaded encoding, ready to count
#[derive(Clone, Copy)]
pub struct Tokenizer {
    encoding: Encoding,
    bpe: &'static CoreBPE,
}

impl Tokenizer {
    /// Load the BPE table for `encoding`
    pub fn load(encoding: Encoding) -> Result<Self, ConfigError> {
        match encoding.bpe() {
            Ok(bpe) => Ok(Self { encoding, bpe }),
            Err(reason) => Err(ConfigError::EncodingUnavailable {
                name: encoding.name().to_string(),
                reason: reason.clone(),
            }),
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl TokenCounter for Tokenizer {
    /// Special-token markers inside the text are counted as ordinary text
    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.bpe.encode_ordinary(text).len()
    }
}
