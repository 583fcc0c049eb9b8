//! Shared data structures for the conversion flow
//!
//! These structs represent the data model that flows between
//! the input layer, the pipeline and the UI layer.

use bytes::Bytes;
use std::fmt;

use crate::format::TargetFormat;
use crate::mime;
use crate::stats;

/// An input image held in memory
///
/// Never mutated once created; cloning only bumps a refcount.
#[derive(Clone, PartialEq)]
pub struct SourceFile {
    /// Display name (e.g., "photo.png")
    name: String,
    /// Raw file bytes
    data: Bytes,
    /// MIME type implied by the name's extension
    mime_type: &'static str,
}

impl SourceFile {
    /// Wrap raw bytes; the MIME type is derived from the name
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime_type = mime::from_name(&name);
        Self {
            name,
            data: data.into(),
            mime_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Byte size of the source
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Lowercased extension as written in the name
    pub fn extension(&self) -> String {
        file_extension(&self.name)
    }

    /// Name with its final extension removed
    pub fn base_name(&self) -> &str {
        strip_extension(&self.name)
    }
}

// Bytes would dump the whole file
impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("size", &self.data.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// One source paired with the format it should become
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub source: SourceFile,
    pub target: TargetFormat,
}

impl ConversionRequest {
    pub fn new(source: SourceFile, target: TargetFormat) -> Self {
        Self { source, target }
    }
}

/// A successfully re-encoded image
#[derive(Clone, PartialEq)]
pub struct ConversionResult {
    /// Output file name (source base name + target extension)
    pub name: String,
    /// Encoded bytes
    pub data: Bytes,
    pub original_size: u64,
    pub converted_size: u64,
    /// Uppercased source extension (e.g., "PNG")
    pub original_format: String,
    pub output_format: TargetFormat,
}

impl ConversionResult {
    /// Signed size reduction in percent; negative when the output grew
    pub fn savings_percent(&self) -> f64 {
        stats::savings_percent(self.original_size, self.converted_size)
    }
}

impl fmt::Debug for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionResult")
            .field("name", &self.name)
            .field("original_size", &self.original_size)
            .field("converted_size", &self.converted_size)
            .field("original_format", &self.original_format)
            .field("output_format", &self.output_format)
            .finish()
    }
}

/// Last `.`-separated piece of a name, lowercased
///
/// A name without a dot yields the whole name, so "README" reports "readme".
pub fn file_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or_default().to_lowercase()
}

/// Strip a trailing `.ext`, where `ext` is non-empty and has no `.` or `/`
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => {
            let ext = &name[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                name
            } else {
                &name[..dot]
            }
        }
        None => name,
    }
}

/// Output name for a source converted to `target`
pub fn output_name(source_name: &str, target: TargetFormat) -> String {
    format!("{}{}", strip_extension(source_name), target.extension())
}
