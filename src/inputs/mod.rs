//! Inputs module - Where the things to measure come from
//!
//! Provides:
//! - stdin: Interpreting piped stdin as a path list or as text
//! - collect: Building the ordered input list from arguments and stdin

pub mod collect;
pub mod stdin;
