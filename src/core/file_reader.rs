//! Bounded file reading
//!
//! Provides:
//! - Binary sniffing from a size-bounded prefix
//! - Reads capped at the configured ceiling
//! - Lossy UTF-8 decoding (invalid sequences become U+FFFD)

use std::fs;
use std::io::Read;
use std::path::Path;

/// Size of the prefix inspected by [`is_binary`] (32 KiB)
pub const BINARY_PREFIX_BYTES: u64 = 32 * 1024;

/// Whether the file looks binary: a NUL byte in the first
/// `min(32 KiB, max_bytes)` bytes.
///
/// Any error opening or reading the prefix counts as "not binary"; the
/// caller's full read reports the real failure.
pub fn is_binary(path: &Path, max_bytes: u64) -> bool {
    let read_len = BINARY_PREFIX_BYTES.min(max_bytes);
    match read_capped(path, read_len) {
        Ok(prefix) => prefix.contains(&0),
        Err(_) => false,
    }
}

/// Read at most `limit` bytes from the start of the file
pub fn read_capped(path: &Path, limit: u64) -> std::io::Result<Vec<u8>> {
    let file = fs::File::open(path)?;
    let mut buffer = Vec::new();
    file.take(limit).read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Decode bytes as UTF-8, replacing invalid sequences
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
