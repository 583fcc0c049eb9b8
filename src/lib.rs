//! Offline image format converter
//!
//! Decodes images (PNG, JPEG, GIF, BMP, WebP, TIFF, SVG), re-encodes them as
//! WebP, PNG or JPEG at a fixed per-format quality, and packages the results
//! as single files or one ZIP archive. Conversion runs one file at a time; a
//! failed file is logged and skipped.

pub mod archive;
pub mod convert;
pub mod error;
pub mod files;
pub mod format;
pub mod mime;
pub mod settings;
pub mod state;
pub mod stats;

pub use archive::DownloadArtifact;
pub use convert::{ConversionReport, Converter, PipelineEvent, Progress};
pub use error::{ArchiveError, ConvertError, InputError};
pub use format::TargetFormat;
pub use settings::Settings;
pub use state::{ConversionRequest, ConversionResult, Selection, SourceFile};
