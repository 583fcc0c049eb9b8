//! State management module
//!
//! This module handles all conversion state, including:
//! - Shared data structures (data.rs)
//! - The current file selection and its per-file formats (selection.rs)

pub mod data;
pub mod selection;

pub use data::{ConversionRequest, ConversionResult, SourceFile};
pub use selection::Selection;
