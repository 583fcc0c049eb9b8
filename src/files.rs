//! Filesystem boundary
//!
//! Turns picked or dropped paths into in-memory source files, and writes
//! finished downloads back to disk. Folders are walked recursively; only
//! files whose implied MIME type is on the allow-list are read.

use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::archive::DownloadArtifact;
use crate::error::InputError;
use crate::mime;
use crate::state::SourceFile;

/// Expand folders into the supported image files they contain
///
/// Explicit file paths are kept in the order given; folder contents are
/// sorted by name.
pub fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            debug!("🔍 Scanning folder: {}", path.display());
            for entry in WalkDir::new(path)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && is_supported_path(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else if is_supported_path(path) {
            files.push(path.clone());
        } else {
            debug!("Skipping unsupported file: {}", path.display());
        }
    }

    files
}

fn is_supported_path(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str());
    mime::is_supported(mime::from_extension(ext))
}

/// Read one file into memory
pub fn read_source(path: &Path) -> Result<SourceFile, InputError> {
    let data = std::fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SourceFile::new(display_name(path), data))
}

/// File name only (e.g., "DSC_0001.png")
fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Blocking version of `load_sources`
///
/// Unreadable files are logged and skipped.
pub fn load_sources_blocking(paths: &[PathBuf]) -> Vec<SourceFile> {
    expand_paths(paths)
        .iter()
        .filter_map(|path| match read_source(path) {
            Ok(source) => Some(source),
            Err(e) => {
                warn!("⚠️  {}", e);
                None
            }
        })
        .collect()
}

/// Load picked paths as source files on the blocking pool
pub async fn load_sources(paths: Vec<PathBuf>) -> Vec<SourceFile> {
    let result = task::spawn_blocking(move || load_sources_blocking(&paths))
        .await
        .map_err(|e| InputError::Worker(e.to_string()));

    match result {
        Ok(sources) => {
            info!("📁 Loaded {} files", sources.len());
            sources
        }
        Err(e) => {
            warn!("⚠️  {}", e);
            Vec::new()
        }
    }
}

/// Write a download to `path`
///
/// Returns the path written, or a message for the status line.
pub async fn save_artifact(artifact: DownloadArtifact, path: PathBuf) -> Result<PathBuf, String> {
    tokio::fs::write(&path, &artifact.data)
        .await
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;

    info!("💾 Saved {} ({} bytes)", path.display(), artifact.data.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_expand_walks_folders_and_filters() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("b.png"), b"png").unwrap();
        fs::write(dir.path().join("a.JPG"), b"jpg").unwrap();
        fs::write(dir.path().join("notes.txt"), b"txt").unwrap();
        fs::write(nested.join("c.svg"), b"<svg/>").unwrap();

        let files = expand_paths(&[dir.path().to_path_buf()]);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.JPG", "b.png", "c.svg"]);
    }

    #[test]
    fn test_load_skips_missing_files() {
        let dir = tempdir().unwrap();
        let present = dir.path().join("here.webp");
        fs::write(&present, b"data").unwrap();
        let missing = dir.path().join("gone.png");

        let sources = load_sources_blocking(&[missing, present]);

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name(), "here.webp");
        assert_eq!(sources[0].size(), 4);
        assert_eq!(sources[0].mime_type(), "image/webp");
    }

    #[tokio::test]
    async fn test_load_sources_async() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("x.gif"), b"gif").unwrap();

        let sources = load_sources(vec![dir.path().to_path_buf()]).await;
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name(), "x.gif");
    }

    #[tokio::test]
    async fn test_save_artifact() {
        let dir = tempdir().unwrap();
        let artifact = DownloadArtifact {
            file_name: "out.png".into(),
            data: bytes::Bytes::from_static(b"png bytes"),
            mime_type: "image/png",
        };
        let target = dir.path().join("out.png");

        let written = save_artifact(artifact, target.clone()).await.unwrap();
        assert_eq!(written, target);
        assert_eq!(fs::read(&target).unwrap(), b"png bytes");
    }
}
