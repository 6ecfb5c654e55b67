//! Input collection
//!
//! Turns positional arguments and (conditionally) piped stdin into the ordered
//! list of inputs to measure. Stdin is read at most once per run through
//! [`StdinCache`], however many rules need it.

use anyhow::{Context, Result};
use std::io::{IsTerminal, Read};

use crate::core::config::Config;
use crate::core::model::InputItem;
use crate::inputs::stdin::{parse_stdin, ParsedStdin, StdinMode};

/// Positional argument that stands for "piped stdin, as text"
pub const STDIN_SENTINEL: &str = "-";

/// Where stdin bytes come from
pub trait StdinSource {
    /// True when stdin is an interactive terminal (nothing piped)
    fn is_terminal(&self) -> bool;

    /// Read the whole stream
    fn read_all(&mut self) -> std::io::Result<Vec<u8>>;
}

/// The process's real stdin
#[derive(Debug, Default)]
pub struct ProcessStdin;

impl StdinSource for ProcessStdin {
    fn is_terminal(&self) -> bool {
        std::io::stdin().is_terminal()
    }

    fn read_all(&mut self) -> std::io::Result<Vec<u8>> {
        let mut buffer = Vec::new();
        std::io::stdin().lock().read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// Memoized stdin: the source is read on first use and never again
#[derive(Debug)]
pub struct StdinCache<S> {
    source: S,
    bytes: Option<Vec<u8>>,
}

impl<S: StdinSource> StdinCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            bytes: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.source.is_terminal()
    }

    /// Stdin bytes, reading the source only the first time
    pub fn bytes(&mut self) -> Result<&[u8]> {
        if self.bytes.is_none() {
            let data = self.source.read_all().context("Failed to read stdin")?;
            self.bytes = Some(data);
        }
        Ok(self.bytes.as_deref().unwrap_or_default())
    }
}

/// Build the ordered input list: positionals first, stdin-derived items last
pub fn collect_inputs<S: StdinSource>(
    config: &Config,
    stdin: &mut StdinCache<S>,
) -> Result<Vec<InputItem>> {
    let mut inputs = Vec::new();

    if config.paths.is_empty() {
        if stdin.is_terminal() {
            return Ok(inputs);
        }
        let mode = config.resolved_stdin_mode();
        inputs.extend(stdin_items(config, mode, stdin)?);
        return Ok(inputs);
    }

    let mut sentinel_used = false;
    for path in &config.paths {
        if path == STDIN_SENTINEL {
            sentinel_used = true;
            inputs.push(InputItem::stdin_text(stdin.bytes()?));
        } else {
            inputs.push(InputItem::path(path.as_str()));
        }
    }

    let mode = config.resolved_stdin_mode();
    if !sentinel_used && mode != StdinMode::Ignore && !stdin.is_terminal() {
        inputs.extend(stdin_items(config, mode, stdin)?);
    }

    Ok(inputs)
}

fn stdin_items<S: StdinSource>(
    config: &Config,
    mode: StdinMode,
    stdin: &mut StdinCache<S>,
) -> Result<Vec<InputItem>> {
    if mode == StdinMode::Ignore {
        return Ok(Vec::new());
    }

    let ParsedStdin {
        mode: concrete,
        classification,
        items,
    } = parse_stdin(mode, stdin.bytes()?);

    if config.verbose {
        match classification {
            Some(c) => eprintln!(
                "toksum: stdin auto-detected as {} ({}/{} lines are existing paths)",
                concrete, c.existing, c.lines
            ),
            None => eprintln!("toksum: stdin read as {}", concrete),
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{InputKind, STDIN_ID};
    use std::fs;
    use tempfile::TempDir;

    /// Scripted stdin that counts how often it is read
    struct FakeStdin {
        data: Vec<u8>,
        terminal: bool,
        reads: usize,
    }

    impl FakeStdin {
        fn piped(data: &[u8]) -> Self {
            Self {
                data: data.to_vec(),
                terminal: false,
                reads: 0,
            }
        }

        fn terminal() -> Self {
            Self {
                data: Vec::new(),
                terminal: true,
                reads: 0,
            }
        }
    }

    impl StdinSource for FakeStdin {
        fn is_terminal(&self) -> bool {
            self.terminal
        }

        fn read_all(&mut self) -> std::io::Result<Vec<u8>> {
            self.reads += 1;
            Ok(self.data.clone())
        }
    }

    struct BrokenStdin;

    impl StdinSource for BrokenStdin {
        fn is_terminal(&self) -> bool {
            false
        }

        fn read_all(&mut self) -> std::io::Result<Vec<u8>> {
            Err(std::io::Error::other("pipe closed"))
        }
    }

    fn config_with(paths: &[&str], stdin_mode: Option<StdinMode>) -> Config {
        Config {
            paths: paths.iter().map(|p| p.to_string()).collect(),
            stdin_mode,
            ..Default::default()
        }
    }

    fn ids(items: &[InputItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_cache_reads_once() {
        let mut cache = StdinCache::new(FakeStdin::piped(b"abc"));
        assert_eq!(cache.bytes().unwrap(), b"abc");
        assert_eq!(cache.bytes().unwrap(), b"abc");
        assert_eq!(cache.source.reads, 1);
    }

    #[test]
    fn test_cache_propagates_read_error() {
        let mut cache = StdinCache::new(BrokenStdin);
        let err = cache.bytes().unwrap_err();
        assert!(err.to_string().contains("Failed to read stdin"));
    }

    #[test]
    fn test_sentinel_reads_stdin_as_text() {
        let config = config_with(&["-"], None);
        let mut stdin = StdinCache::new(FakeStdin::piped(b"hello world"));
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, STDIN_ID);
        assert_eq!(
            items[0].kind,
            InputKind::Text {
                text: "hello world".to_string(),
                byte_len: Some(11),
            }
        );
    }

    #[test]
    fn test_repeated_sentinel_reads_stdin_once() {
        let config = config_with(&["-", "a.txt", "-"], Some(StdinMode::Paths));
        let mut stdin = StdinCache::new(FakeStdin::piped(b"x\ny\n"));
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert_eq!(ids(&items), vec![STDIN_ID, "a.txt", STDIN_ID]);
        assert_eq!(stdin.source.reads, 1);
    }

    #[test]
    fn test_positionals_ignore_stdin_by_default() {
        let config = config_with(&["a.txt", "b.txt"], None);
        let mut stdin = StdinCache::new(FakeStdin::piped(b"c.txt\nd.txt\n"));
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert_eq!(ids(&items), vec!["a.txt", "b.txt"]);
        assert!(items.iter().all(InputItem::is_path));
        assert_eq!(stdin.source.reads, 0);
    }

    #[test]
    fn test_positionals_then_stdin_paths() {
        let config = config_with(&["a.txt"], Some(StdinMode::Paths));
        let mut stdin = StdinCache::new(FakeStdin::piped(b"c.txt\n\n d.txt \n"));
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert_eq!(ids(&items), vec!["a.txt", "c.txt", "d.txt"]);
    }

    #[test]
    fn test_positionals_then_stdin_text() {
        let config = config_with(&["a.txt"], Some(StdinMode::Text));
        let mut stdin = StdinCache::new(FakeStdin::piped(b"some text"));
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert_eq!(ids(&items), vec!["a.txt", STDIN_ID]);
        assert!(!items[1].is_path());
    }

    #[test]
    fn test_sentinel_suppresses_stdin_append() {
        let config = config_with(&["-", "a.txt"], Some(StdinMode::Paths));
        let mut stdin = StdinCache::new(FakeStdin::piped(b"c.txt\nd.txt\n"));
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert_eq!(ids(&items), vec![STDIN_ID, "a.txt"]);
    }

    #[test]
    fn test_positionals_with_terminal_stdin() {
        let config = config_with(&["a.txt"], Some(StdinMode::Text));
        let mut stdin = StdinCache::new(FakeStdin::terminal());
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert_eq!(ids(&items), vec!["a.txt"]);
        assert_eq!(stdin.source.reads, 0);
    }

    #[test]
    fn test_no_positionals_terminal_is_empty() {
        let config = config_with(&[], None);
        let mut stdin = StdinCache::new(FakeStdin::terminal());
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert!(items.is_empty());
        assert_eq!(stdin.source.reads, 0);
    }

    #[test]
    fn test_no_positionals_ignore_mode_is_empty() {
        let config = config_with(&[], Some(StdinMode::Ignore));
        let mut stdin = StdinCache::new(FakeStdin::piped(b"text"));
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert!(items.is_empty());
        assert_eq!(stdin.source.reads, 0);
    }

    #[test]
    fn test_no_positionals_auto_detects_paths() {
        let dir = TempDir::new().unwrap();
        let mut listing = String::new();
        for name in ["one.txt", "two.txt", "three.txt"] {
            let path = dir.path().join(name);
            fs::write(&path, name).unwrap();
            listing.push_str(&format!("{}\n", path.display()));
        }

        let config = config_with(&[], None);
        let mut stdin = StdinCache::new(FakeStdin::piped(listing.as_bytes()));
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(InputItem::is_path));
        assert!(items[0].id.ends_with("one.txt"));
        assert!(items[2].id.ends_with("three.txt"));
    }

    #[test]
    fn test_no_positionals_auto_detects_text() {
        let config = config_with(&[], None);
        let mut stdin = StdinCache::new(FakeStdin::piped(b"just some words\nand more\n"));
        let items = collect_inputs(&config, &mut stdin).unwrap();
        assert_eq!(ids(&items), vec![STDIN_ID]);
    }
}
