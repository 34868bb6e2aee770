//! Script-file persistence of the ranked dataset
//!
//! The dataset lives in a browser-loadable script of the form
//! `window.COLLAGE_DATA = [ ... ];`. Loading is forgiving and saving is
//! all-or-nothing.

use crate::dataset::record::Record;
use crate::io::configuration::DATASET_VARIABLE;
use crate::io::error::{CollageError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Source and sink of the persisted dataset
pub trait DatasetStore {
    /// Load every record, degrading to an empty list on any problem
    fn load(&self) -> Vec<Record>;

    /// Replace the persisted dataset with `records`
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset cannot be serialized or written; the
    /// previously persisted dataset must survive a failed save
    fn save(&self, records: &[Record]) -> Result<()>;
}

/// Dataset stored as a script assigning a JSON array to a global
#[derive(Clone, Debug)]
pub struct ScriptFileStore {
    path: PathBuf,
}

impl ScriptFileStore {
    /// Store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the dataset file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset, distinguishing a malformed file from a missing one
    ///
    /// A missing or blank file is an empty dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn try_load(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = std::fs::read_to_string(&self.path).map_err(|e| CollageError::FileSystem {
            path: self.path.clone(),
            operation: "read dataset",
            source: e,
        })?;
        parse_payload(&text)
    }
}

impl DatasetStore for ScriptFileStore {
    fn load(&self) -> Vec<Record> {
        match self.try_load() {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Ignoring unreadable dataset, continuing with an empty one; \
                     the next save replaces it: {error}"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[Record]) -> Result<()> {
        let payload = render_payload(records)?;
        write_atomically(&self.path, payload.as_bytes())?;
        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "Wrote ranked dataset"
        );
        Ok(())
    }
}

/// Extract the record array from a script payload
///
/// Takes everything between the first `[` and the last `]`. Blank input is an
/// empty dataset.
///
/// # Errors
///
/// Returns an error if no array is present or the array is not valid JSON
pub fn parse_payload(text: &str) -> Result<Vec<Record>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let array = match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => text.get(start..=end),
        _ => None,
    }
    .ok_or_else(|| CollageError::DatasetFormat {
        reason: format!("no '{DATASET_VARIABLE}' array found"),
    })?;

    serde_json::from_str(array).map_err(|e| CollageError::DatasetFormat {
        reason: e.to_string(),
    })
}

/// Render records as the script payload, pretty-printed with two-space indents
///
/// # Errors
///
/// Returns an error if a record cannot be serialized
pub fn render_payload(records: &[Record]) -> Result<String> {
    let json = serde_json::to_string_pretty(records).map_err(|e| CollageError::DatasetFormat {
        reason: e.to_string(),
    })?;
    Ok(format!("{DATASET_VARIABLE} = {json};\n"))
}

/// Write `bytes` to a sibling temporary file, then rename it over `path`
///
/// # Errors
///
/// Returns an error if any step fails; `path` keeps its previous contents
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_error = |e: std::io::Error| CollageError::DatasetWrite {
        path: path.to_path_buf(),
        source: e,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory).map_err(write_error)?;

    let mut file = NamedTempFile::new_in(directory).map_err(write_error)?;
    file.write_all(bytes).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
