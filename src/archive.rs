//! Download packaging
//!
//! A single result downloads as its own file. Two or more are bundled into
//! one ZIP container, in result order.

use bytes::Bytes;
use std::io::{Cursor, Write};
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ArchiveError;
use crate::mime;
use crate::state::ConversionResult;

/// A named blob ready for a "save as" action
#[derive(Clone, PartialEq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub data: Bytes,
    pub mime_type: &'static str,
}

impl std::fmt::Debug for DownloadArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadArtifact")
            .field("file_name", &self.file_name)
            .field("size", &self.data.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

impl DownloadArtifact {
    /// Wrap one result as its own download
    pub fn single(result: &ConversionResult) -> Self {
        Self {
            file_name: result.name.clone(),
            data: result.data.clone(),
            mime_type: result.output_format.mime_type(),
        }
    }
}

/// Build the download for a set of results
///
/// Returns `None` when there is nothing to download.
pub fn package(
    results: &[ConversionResult],
    archive_name: &str,
) -> Result<Option<DownloadArtifact>, ArchiveError> {
    match results {
        [] => Ok(None),
        [only] => Ok(Some(DownloadArtifact::single(only))),
        many => {
            let data = build_zip(many)?;
            info!("📦 Packed {} files into {} ({} bytes)", many.len(), archive_name, data.len());
            Ok(Some(DownloadArtifact {
                file_name: archive_name.to_string(),
                data: data.into(),
                mime_type: mime::ZIP,
            }))
        }
    }
}

/// Write all results into an in-memory ZIP
///
/// Entries are stored without recompression. A name that appears twice keeps
/// its first position but carries the later result's bytes, matching
/// archivers that key entries by name.
pub fn build_zip(results: &[ConversionResult]) -> Result<Vec<u8>, ArchiveError> {
    let mut entries: Vec<(&str, &Bytes)> = Vec::with_capacity(results.len());
    for result in results {
        match entries.iter().position(|(name, _)| *name == result.name) {
            Some(i) => entries[i].1 = &result.data,
            None => entries.push((result.name.as_str(), &result.data)),
        }
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(name, options)?;
        zip.write_all(data)?;
    }

    Ok(zip.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::TargetFormat;
    use std::io::Read;
    use zip::ZipArchive;

    fn result(name: &str, data: &'static [u8]) -> ConversionResult {
        ConversionResult {
            name: name.to_string(),
            data: Bytes::from_static(data),
            original_size: 100,
            converted_size: data.len() as u64,
            original_format: "PNG".into(),
            output_format: TargetFormat::Webp,
        }
    }

    fn read_entries(data: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut buf = Vec::new();
                file.read_to_end(&mut buf).unwrap();
                (file.name().to_string(), buf)
            })
            .collect()
    }

    #[test]
    fn test_nothing_to_download() {
        assert!(package(&[], "out.zip").unwrap().is_none());
    }

    #[test]
    fn test_single_result_is_not_archived() {
        let artifact = package(&[result("photo.webp", b"abc")], "out.zip")
            .unwrap()
            .unwrap();
        assert_eq!(artifact.file_name, "photo.webp");
        assert_eq!(&artifact.data[..], b"abc");
        assert_eq!(artifact.mime_type, "image/webp");
    }

    #[test]
    fn test_many_results_are_zipped_in_order() {
        let results = vec![result("b.webp", b"bbb"), result("a.webp", b"a")];
        let artifact = package(&results, "converted-images.zip").unwrap().unwrap();

        assert_eq!(artifact.file_name, "converted-images.zip");
        assert_eq!(artifact.mime_type, "application/zip");
        assert_eq!(
            read_entries(&artifact.data),
            vec![
                ("b.webp".to_string(), b"bbb".to_vec()),
                ("a.webp".to_string(), b"a".to_vec()),
            ]
        );
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let results = vec![
            result("photo.jpg", b"first"),
            result("other.jpg", b"o"),
            result("photo.jpg", b"second"),
        ];
        let entries = read_entries(&build_zip(&results).unwrap());

        assert_eq!(
            entries,
            vec![
                ("photo.jpg".to_string(), b"second".to_vec()),
                ("other.jpg".to_string(), b"o".to_vec()),
            ]
        );
    }
}
