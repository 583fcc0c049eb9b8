//! MIME type helpers for input files
//!
//! Source files carry an implied MIME type derived from their extension,
//! the same way a file picker reports it. Only the allow-list below may
//! enter a selection.

/// Input MIME types accepted into a selection
pub const SUPPORTED_INPUT_FORMATS: [&str; 8] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/bmp",
    "image/webp",
    "image/tiff",
    "image/svg+xml",
];

pub const SVG: &str = "image/svg+xml";
pub const ZIP: &str = "application/zip";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess the MIME type of a file from its extension (case-insensitive)
pub fn from_extension(ext: Option<&str>) -> &'static str {
    match ext.map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg" | "jpe" | "jfif") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("tif" | "tiff") => "image/tiff",
        Some("svg") => SVG,
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",
        Some("zip") => ZIP,
        _ => OCTET_STREAM,
    }
}

/// Guess the MIME type of a file from its display name
pub fn from_name(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, ext)| ext);
    from_extension(ext)
}

/// Check a MIME type against the input allow-list
pub fn is_supported(mime: &str) -> bool {
    SUPPORTED_INPUT_FORMATS.contains(&mime)
}
