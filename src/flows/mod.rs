//! Flows module - Operations combining inputs, measurement, and rendering
//!
//! Provides:
//! - summary: Measure inputs, aggregate totals, render, and pick the exit code

pub mod summary;
