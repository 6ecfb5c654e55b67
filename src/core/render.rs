//! Renderer module
//!
//! Renders measured items in one of two modes:
//! - human: line-oriented, successes and the total on stdout, skips on stderr
//! - json: a single document on stdout, written once after all items are known

use colored::Colorize;
use std::io::Write;

use crate::core::model::{MeasuredItem, Outcome, Report, SkipReason, Totals};

/// Hint appended to `not_a_file` skips
pub const NOT_A_FILE_HINT: &str = " (hint: use fd)";

/// Output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Human,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

/// Render configuration
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub mode: OutputMode,
    /// Color the SKIP tag on stderr
    pub color: bool,
    /// Encoding name echoed in JSON output
    pub encoding: String,
    /// Ceiling echoed in JSON output
    pub max_bytes: u64,
}

/// Renderer for measured items
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Write the report to `out` (primary) and `err` (diagnostic)
    pub fn render_to<O: Write, E: Write>(
        &self,
        results: &[MeasuredItem],
        totals: &Totals,
        out: &mut O,
        err: &mut E,
    ) -> std::io::Result<()> {
        match self.config.mode {
            OutputMode::Human => self.render_human(results, totals, out, err),
            OutputMode::Json => {
                let document = self.render_json(results, totals)?;
                out.write_all(document.as_bytes())?;
                out.flush()
            }
        }
    }

    fn render_human<O: Write, E: Write>(
        &self,
        results: &[MeasuredItem],
        totals: &Totals,
        out: &mut O,
        err: &mut E,
    ) -> std::io::Result<()> {
        for item in results {
            if let Outcome::Ok { tokens, bytes } = item.outcome {
                writeln!(out, "{} tokens={} bytes={}", item.id, tokens, bytes)?;
            }
        }
        writeln!(
            out,
            "total tokens={} ok={} skipped={}",
            totals.tokens, totals.ok, totals.skipped
        )?;
        out.flush()?;

        for item in results {
            if let Outcome::Skipped(reason) = item.outcome {
                writeln!(err, "{}", self.skip_line(&item.id, reason))?;
            }
        }
        err.flush()
    }

    fn skip_line(&self, id: &str, reason: SkipReason) -> String {
        let tag = if self.config.color {
            "SKIP".yellow().bold().to_string()
        } else {
            "SKIP".to_string()
        };
        let hint = if reason == SkipReason::NotAFile {
            NOT_A_FILE_HINT
        } else {
            ""
        };
        format!("{} {} reason={}{}", tag, id, reason, hint)
    }

    /// Pretty-printed JSON document with a trailing newline
    pub fn render_json(&self, results: &[MeasuredItem], totals: &Totals) -> std::io::Result<String> {
        let report = Report::new(
            self.config.encoding.as_str(),
            self.config.max_bytes,
            results,
            *totals,
        );
        let mut document = serde_json::to_string_pretty(&report)?;
        document.push('\n');
        Ok(document)
    }
}
