//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io::{self, IsTerminal, Write};

use crate::core::config::{Config, ConfigError, DEFAULT_ENCODING, DEFAULT_MAX_BYTES};
use crate::core::tokenizer::{Encoding, Tokenizer};
use crate::flows::summary::{run_summary, EXIT_OK, EXIT_USAGE};
use crate::inputs::collect::{collect_inputs, ProcessStdin, StdinCache};
use crate::inputs::stdin::StdinMode;

/// toksum - estimate token counts for files or stdin using tiktoken.
#[derive(Parser, Debug)]
#[command(name = "toksum")]
#[command(
    author,
    version,
    about,
    long_about = r#"Estimate token counts for files or stdin using tiktoken.

Inputs come from positional paths and/or piped stdin. Piped stdin is read
as a list of paths (one per line) or as literal text; see --stdin.
Binary files, files larger than --max-bytes, and anything that is not a
regular file are skipped with a reason.

Exit codes:
- 0: at least one input measured
- 1: nothing measured, or a skip with --fail-on-skip
- 2: no inputs, or invalid configuration

Examples:
    toksum README.md src/main.rs
    fd -e rs -X toksum
    fd -e md | toksum
    cat notes.txt | toksum -
    toksum --json --encoding o200k_base docs/*.md
"#
)]
pub struct Cli {
    /// File paths (use fd ... -X). `-` reads piped stdin as text.
    #[arg(value_name = "PATHS")]
    pub paths: Vec<String>,

    /// Emit a single JSON document instead of lines.
    #[arg(long)]
    pub json: bool,

    /// Max file size to read in bytes.
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_BYTES as i64,
        allow_negative_numbers = true,
        env = "TOKSUM_MAX_BYTES",
        long_help = "Maximum file size to read, in bytes.\n\n\
Files larger than this are skipped as too_large. The same ceiling bounds the\n\
prefix read used to detect binary files (at most 32 KiB)."
    )]
    pub max_bytes: i64,

    /// Tokenizer encoding.
    #[arg(
        long,
        value_name = "NAME",
        default_value = DEFAULT_ENCODING,
        env = "TOKSUM_ENCODING",
        long_help = "Tokenizer encoding.\n\n\
Supported values: cl100k_base (default), o200k_base, p50k_base, p50k_edit,\n\
r50k_base. Run with --list-encodings to print them."
    )]
    pub encoding: String,

    /// How to interpret piped stdin.
    #[arg(
        long,
        value_enum,
        value_name = "MODE",
        long_help = "How to interpret stdin when piped.\n\n\
- auto: a path list if at least 80% of its non-empty lines exist, else text\n\
- paths: one path per line\n\
- text: the whole stream is one text input\n\
- ignore: do not read stdin\n\n\
Default: auto when no paths are given; ignore when paths are present."
    )]
    pub stdin: Option<StdinMode>,

    /// Exit non-zero if any item is skipped.
    #[arg(long)]
    pub fail_on_skip: bool,

    /// Print the supported encodings and exit.
    #[arg(long)]
    pub list_encodings: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Print diagnostics about input handling to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Validate raw arguments into a run configuration
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let max_bytes = Config::parse_max_bytes(self.max_bytes)?;
        let encoding: Encoding = self.encoding.parse()?;
        let color = !self.no_color && io::stderr().is_terminal();

        Ok(Config {
            paths: self.paths,
            stdin_mode: self.stdin,
            max_bytes,
            encoding,
            json: self.json,
            fail_on_skip: self.fail_on_skip,
            verbose: self.verbose,
            color,
        })
    }
}

/// Run the CLI with parsed arguments, returning the process exit code
pub fn run(cli: Cli) -> Result<u8> {
    if cli.list_encodings {
        let mut stdout = io::stdout().lock();
        for name in Encoding::available() {
            writeln!(stdout, "{}", name)?;
        }
        return Ok(EXIT_OK);
    }

    let (config, tokenizer) = match cli.into_config().and_then(|config| {
        let tokenizer = Tokenizer::load(config.encoding)?;
        Ok((config, tokenizer))
    }) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(EXIT_USAGE);
        }
    };

    let mut stdin = StdinCache::new(ProcessStdin);
    let inputs = collect_inputs(&config, &mut stdin)?;
    if inputs.is_empty() {
        Cli::command().print_help()?;
        return Ok(EXIT_USAGE);
    }

    if config.verbose {
        eprintln!(
            "toksum: {} input(s), encoding {}, max bytes {}",
            inputs.len(),
            tokenizer.encoding(),
            config.max_bytes
        );
    }

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    run_summary(&config, &inputs, &tokenizer, &mut stdout, &mut stderr)
}
