//! UI widgets for the converter window
//!
//! - `file_list.rs` - selected files and their target formats
//! - `results.rs` - converted files and download actions

pub mod file_list;
pub mod results;
