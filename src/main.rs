//! toksum - estimate token counts for files or stdin
//!
//! toksum provides:
//! - Token counts for files named on the command line
//! - Path lists or raw text piped through stdin (auto-detected)
//! - Skips with reasons for binary, oversized, and non-file inputs
//! - Line-oriented or JSON output

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod core;
mod flows;
mod inputs;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    let code = cli::run(cli)?;
    Ok(ExitCode::from(code))
}
