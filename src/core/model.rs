//! Accounting model
//!
//! Every input is collected into an [`InputItem`], measured into exactly one
//! [`MeasuredItem`], and the measured list is reduced into [`Totals`] before
//! rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier used for inline text read from standard input
pub const STDIN_ID: &str = "<stdin>";

/// What a logical input refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A filesystem path; the item id is the path as given
    Path,
    /// Literal text already held in memory
    Text {
        text: String,
        /// Byte length when known without re-encoding (e.g. raw stdin)
        byte_len: Option<u64>,
    },
}

/// One unit submitted for measurement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
    pub id: String,
    pub kind: InputKind,
}

impl InputItem {
    /// Create a path reference
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            id: path.into(),
            kind: InputKind::Path,
        }
    }

    /// Create an inline text item
    pub fn text(id: impl Into<String>, text: impl Into<String>, byte_len: Option<u64>) -> Self {
        Self {
            id: id.into(),
            kind: InputKind::Text {
                text: text.into(),
                byte_len,
            },
        }
    }

    /// Create the inline text item for piped stdin bytes
    pub fn stdin_text(bytes: &[u8]) -> Self {
        Self::text(
            STDIN_ID,
            String::from_utf8_lossy(bytes).into_owned(),
            Some(bytes.len() as u64),
        )
    }

    #[allow(dead_code)]
    pub fn is_path(&self) -> bool {
        matches!(self.kind, InputKind::Path)
    }
}

/// Why an input was not measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Missing, unreadable, or not a regular file
    NotAFile,
    /// Larger than the configured ceiling
    TooLarge,
    /// Looks binary (NUL byte in the sniffed prefix)
    Binary,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotAFile => "not_a_file",
            SkipReason::TooLarge => "too_large",
            SkipReason::Binary => "binary",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measurement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Skipped,
}

/// Outcome of measuring one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok { tokens: usize, bytes: u64 },
    Skipped(SkipReason),
}

/// The result for one input, produced 1:1 and in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasuredItem {
    pub id: String,
    pub outcome: Outcome,
}

impl MeasuredItem {
    pub fn ok(id: impl Into<String>, tokens: usize, bytes: u64) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::Ok { tokens, bytes },
        }
    }

    pub fn skipped(id: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::Skipped(reason),
        }
    }

    pub fn status(&self) -> Status {
        match self.outcome {
            Outcome::Ok { .. } => Status::Ok,
            Outcome::Skipped(_) => Status::Skipped,
        }
    }

    pub fn tokens(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Ok { tokens, .. } => Some(tokens),
            Outcome::Skipped(_) => None,
        }
    }

    pub fn bytes(&self) -> Option<u64> {
        match self.outcome {
            Outcome::Ok { bytes, .. } => Some(bytes),
            Outcome::Skipped(_) => None,
        }
    }

    pub fn reason(&self) -> Option<SkipReason> {
        match self.outcome {
            Outcome::Ok { .. } => None,
            Outcome::Skipped(reason) => Some(reason),
        }
    }
}

/// Aggregate counts over a result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub tokens: usize,
    pub ok: usize,
    pub skipped: usize,
    pub inputs: usize,
}

impl Totals {
    /// Reduce measured items into totals
    pub fn from_results(results: &[MeasuredItem]) -> Self {
        let mut totals = results.iter().fold(Totals::default(), |mut acc, item| {
            match item.outcome {
                Outcome::Ok { tokens, .. } => {
                    acc.tokens += tokens;
                    acc.ok += 1;
                }
                Outcome::Skipped(_) => acc.skipped += 1,
            }
            acc
        });
        totals.inputs = totals.ok + totals.skipped;
        totals
    }
}

/// One entry of the JSON `items` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
}

impl From<&MeasuredItem> for ItemRecord {
    fn from(item: &MeasuredItem) -> Self {
        Self {
            id: item.id.clone(),
            status: item.status(),
            tokens: item.tokens(),
            bytes: item.bytes(),
            reason: item.reason(),
        }
    }
}

/// The whole JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub encoding: String,
    pub max_bytes: u64,
    pub items: Vec<ItemRecord>,
    pub total: Totals,
}

impl Report {
    pub fn new(
        encoding: impl Into<String>,
        max_bytes: u64,
        results: &[MeasuredItem],
        total: Totals,
    ) -> Self {
        Self {
            encoding: encoding.into(),
            max_bytes,
            items: results.iter().map(ItemRecord::from).collect(),
            total,
        }
    }
}
