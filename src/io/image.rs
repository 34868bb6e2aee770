//! Source image discovery and dimension probing

use crate::io::error::{CollageError, Result};
use std::path::{Path, PathBuf};

/// Reads the pixel size of a source image
///
/// The placement engine only needs dimensions, never pixels, so tests can
/// substitute a lookup table for real files.
pub trait DimensionProbe {
    /// Return `(width, height)` in pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or decoded
    fn probe_dimensions(&self, path: &Path) -> Result<(u32, u32)>;
}

/// Probe backed by the `image` crate header decoders
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageProbe;

impl DimensionProbe for ImageProbe {
    fn probe_dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        probe_dimensions(path)
    }
}

/// Read image dimensions without decoding the pixel data
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not a supported image
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|e| CollageError::ImageProbe {
        path: path.to_path_buf(),
        source: e,
    })
}

/// List regular files in `directory` whose extension is in `extensions`
///
/// Extensions are given without the leading dot and compared
/// case-insensitively. The result is sorted so listings are reproducible.
///
/// # Errors
///
/// Returns an error if the directory cannot be read
pub fn list_candidates(directory: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let read_error = |e: std::io::Error| CollageError::FileSystem {
        path: directory.to_path_buf(),
        operation: "list images",
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && has_allowed_extension(&path, extensions) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Case-insensitive extension match, ignoring a leading dot in `extensions`
pub fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
}
