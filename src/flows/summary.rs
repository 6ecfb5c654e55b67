//! Summary flow - measure every collected input and report totals
//!
//! Paths go through stat/size/binary gating before being read and tokenized;
//! inline text is always tokenized. Per-item problems become skip reasons,
//! never errors.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::config::Config;
use crate::core::file_reader::{decode_lossy, is_binary, read_capped};
use crate::core::model::{InputItem, InputKind, MeasuredItem, SkipReason, Totals};
use crate::core::render::{OutputMode, RenderConfig, Renderer};
use crate::core::tokenizer::TokenCounter;

/// At least one input measured and no skip escalated
pub const EXIT_OK: u8 = 0;
/// Nothing measured, or a skip with `--fail-on-skip`
pub const EXIT_FAILURE: u8 = 1;
/// No inputs, or the configuration was rejected
pub const EXIT_USAGE: u8 = 2;

/// Measure one path reference
pub fn process_path<T: TokenCounter + ?Sized>(
    path: &str,
    max_bytes: u64,
    counter: &T,
    verbose: bool,
) -> MeasuredItem {
    let fs_path = Path::new(path);

    let metadata = match fs::metadata(fs_path) {
        Ok(m) => m,
        Err(e) => {
            note(verbose, format_args!("{}: cannot stat: {}", path, e));
            return MeasuredItem::skipped(path, SkipReason::NotAFile);
        }
    };

    if !metadata.is_file() {
        return MeasuredItem::skipped(path, SkipReason::NotAFile);
    }

    if metadata.len() > max_bytes {
        note(
            verbose,
            format_args!("{}: {} bytes exceeds limit {}", path, metadata.len(), max_bytes),
        );
        return MeasuredItem::skipped(path, SkipReason::TooLarge);
    }

    if is_binary(fs_path, max_bytes) {
        return MeasuredItem::skipped(path, SkipReason::Binary);
    }

    let data = match read_capped(fs_path, max_bytes) {
        Ok(data) => data,
        Err(e) => {
            note(verbose, format_args!("{}: cannot read: {}", path, e));
            return MeasuredItem::skipped(path, SkipReason::NotAFile);
        }
    };

    let tokens = counter.count(&decode_lossy(&data));
    MeasuredItem::ok(path, tokens, data.len() as u64)
}

/// Measure inline text; always succeeds
pub fn process_text<T: TokenCounter + ?Sized>(
    id: &str,
    text: &str,
    byte_len: Option<u64>,
    counter: &T,
) -> MeasuredItem {
    let bytes = byte_len.unwrap_or(text.len() as u64);
    MeasuredItem::ok(id, counter.count(text), bytes)
}

/// Measure one input of either kind
pub fn process_item<T: TokenCounter + ?Sized>(
    item: &InputItem,
    config: &Config,
    counter: &T,
) -> MeasuredItem {
    match &item.kind {
        InputKind::Path => process_path(&item.id, config.max_bytes, counter, config.verbose),
        InputKind::Text { text, byte_len } => process_text(&item.id, text, *byte_len, counter),
    }
}

/// Measure every input in order, one result per input
pub fn measure_all<T: TokenCounter + ?Sized>(
    inputs: &[InputItem],
    config: &Config,
    counter: &T,
) -> Vec<MeasuredItem> {
    inputs
        .iter()
        .map(|item| process_item(item, config, counter))
        .collect()
}

/// Exit code for a finished run with at least one input
pub fn exit_code(totals: &Totals, fail_on_skip: bool) -> u8 {
    if totals.ok == 0 {
        return EXIT_FAILURE;
    }
    if fail_on_skip && totals.skipped > 0 {
        return EXIT_FAILURE;
    }
    EXIT_OK
}

/// Measure, aggregate, render, and pick the exit code
pub fn run_summary<T, O, E>(
    config: &Config,
    inputs: &[InputItem],
    counter: &T,
    out: &mut O,
    err: &mut E,
) -> Result<u8>
where
    T: TokenCounter + ?Sized,
    O: Write,
    E: Write,
{
    let results = measure_all(inputs, config, counter);
    let totals = Totals::from_results(&results);

    let renderer = Renderer::new(RenderConfig {
        mode: OutputMode::from_json_flag(config.json),
        color: config.color,
        encoding: config.encoding.name().to_string(),
        max_bytes: config.max_bytes,
    });
    renderer
        .render_to(&results, &totals, out, err)
        .context("Failed to write report")?;

    Ok(exit_code(&totals, config.fail_on_skip))
}

fn note(verbose: bool, message: std::fmt::Arguments<'_>) {
    if verbose {
        eprintln!("toksum: {}", message);
    }
}
