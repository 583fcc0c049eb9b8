//! The current batch of files, their chosen formats, and the last results
//!
//! Files and formats are kept index-aligned. Every new selection resets both
//! lists and clears prior results.

use tracing::debug;

use super::data::{ConversionRequest, ConversionResult, SourceFile};
use crate::format::TargetFormat;
use crate::mime;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    files: Vec<SourceFile>,
    formats: Vec<TargetFormat>,
    results: Vec<ConversionResult>,
    default_format: TargetFormat,
}

impl Selection {
    /// Create an empty selection whose new files default to `default_format`
    pub fn new(default_format: TargetFormat) -> Self {
        Self {
            default_format,
            ..Self::default()
        }
    }

    /// Start a new batch, keeping only supported inputs
    ///
    /// Returns the number of files accepted.
    pub fn replace(&mut self, files: Vec<SourceFile>) -> usize {
        self.files.clear();
        self.formats.clear();
        self.results.clear();
        self.extend(files)
    }

    /// Add files to the current batch (one drag-and-drop gesture delivers
    /// its files one at a time); prior results are cleared
    pub fn extend(&mut self, files: Vec<SourceFile>) -> usize {
        let before = self.files.len();
        for file in files {
            if !mime::is_supported(file.mime_type()) {
                debug!(name = file.name(), mime = file.mime_type(), "Skipping unsupported file");
                continue;
            }
            self.files.push(file);
            self.formats.push(self.default_format);
        }
        self.results.clear();
        self.files.len() - before
    }

    /// Change the target format of one file; out-of-range indices are ignored
    pub fn set_format(&mut self, index: usize, format: TargetFormat) {
        if let Some(slot) = self.formats.get_mut(index) {
            *slot = format;
        }
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn formats(&self) -> &[TargetFormat] {
        &self.formats
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Pair every file with its format, in selection order
    pub fn requests(&self) -> Vec<ConversionRequest> {
        self.files
            .iter()
            .zip(&self.formats)
            .map(|(file, format)| ConversionRequest::new(file.clone(), *format))
            .collect()
    }

    pub fn results(&self) -> &[ConversionResult] {
        &self.results
    }

    pub fn set_results(&mut self, results: Vec<ConversionResult>) {
        self.results = results;
    }

    /// Total bytes of the selected sources
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(SourceFile::size).sum()
    }
}
