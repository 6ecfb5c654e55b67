//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Accounting model (inputs, measured items, totals)
//! - Validated configuration and its errors
//! - Bounded file reading and binary sniffing
//! - Rendering for human and JSON output
//! - Token counting with tiktoken encodings

pub mod config;
pub mod file_reader;
pub mod model;
pub mod render;
pub mod tokenizer;
