//! Stdin interpretation
//!
//! Piped stdin is either a list of paths (one per line) or literal text.
//! `auto` picks between the two with [`classify`]; [`materialize`] then turns
//! the content into input items under a concrete mode.

use clap::ValueEnum;
use std::fmt;
use std::path::Path;

use crate::core::model::{InputItem, STDIN_ID};

/// Minimum share of existing paths for `auto` to read stdin as a path list
pub const AUTO_PATHS_RATIO: f64 = 0.8;

/// Requested stdin interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StdinMode {
    /// Guess between paths and text
    Auto,
    /// One path per line
    Paths,
    /// The whole stream is one text input
    Text,
    /// Do not read stdin
    Ignore,
}

/// A stdin interpretation with `auto` already resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcreteMode {
    Paths,
    Text,
    Ignore,
}

impl fmt::Display for ConcreteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConcreteMode::Paths => "paths",
            ConcreteMode::Text => "text",
            ConcreteMode::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

/// Trimmed, non-empty lines in original order
pub fn path_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Outcome of the `auto` heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub mode: ConcreteMode,
    /// Candidate lines considered
    pub lines: usize,
    /// Lines that named an existing filesystem entry
    pub existing: usize,
}

/// Decide whether `text` is a path list, checking existence with `exists`
pub fn classify_with<F>(text: &str, exists: F) -> Classification
where
    F: Fn(&str) -> bool,
{
    let lines = path_lines(text);
    if lines.is_empty() || !text.contains('\n') {
        return Classification {
            mode: ConcreteMode::Text,
            lines: lines.len(),
            existing: 0,
        };
    }

    let existing = lines.iter().filter(|&&line| exists(line)).count();
    let ratio = existing as f64 / lines.len() as f64;
    let mode = if ratio >= AUTO_PATHS_RATIO {
        ConcreteMode::Paths
    } else {
        ConcreteMode::Text
    };

    Classification {
        mode,
        lines: lines.len(),
        existing,
    }
}

/// Decide whether `text` is a path list against the real filesystem
pub fn classify(text: &str) -> Classification {
    classify_with(text, |line| Path::new(line).exists())
}

/// Build input items from stdin content under a concrete mode
pub fn materialize(mode: ConcreteMode, raw: &[u8], text: &str) -> Vec<InputItem> {
    match mode {
        ConcreteMode::Ignore => Vec::new(),
        ConcreteMode::Text => vec![InputItem::text(STDIN_ID, text, Some(raw.len() as u64))],
        ConcreteMode::Paths => path_lines(text).into_iter().map(InputItem::path).collect(),
    }
}

/// Stdin content turned into input items
#[derive(Debug, Clone)]
pub struct ParsedStdin {
    pub mode: ConcreteMode,
    /// Present when the mode came from the `auto` heuristic
    pub classification: Option<Classification>,
    pub items: Vec<InputItem>,
}

/// Resolve `auto` (if requested) and materialize stdin bytes
pub fn parse_stdin(mode: StdinMode, raw: &[u8]) -> ParsedStdin {
    let text = String::from_utf8_lossy(raw);
    let (concrete, classification) = match mode {
        StdinMode::Auto => {
            let classification = classify(&text);
            (classification.mode, Some(classification))
        }
        StdinMode::Paths => (ConcreteMode::Paths, None),
        StdinMode::Text => (ConcreteMode::Text, None),
        StdinMode::Ignore => (ConcreteMode::Ignore, None),
    };
    ParsedStdin {
        mode: concrete,
        classification,
        items: materialize(concrete, raw, &text),
    }
}
