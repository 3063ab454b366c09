//! Selected file reference and its one-line description

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// MIME label shown when the file type could not be determined
pub const UNKNOWN_MIME_LABEL: &str = "binary";

/// A file picked or dropped into an acquisition zone
///
/// Holds only descriptive metadata and the path; contents are read when a
/// request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: Option<String>,
    pub path: PathBuf,
}

impl SelectedFile {
    /// Build a reference from a path on disk
    ///
    /// The MIME type is sniffed from the leading bytes; unknown formats
    /// (plain text included) leave it empty.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(Error::InvalidInput(format!(
                "Not a regular file: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidInput(format!("No file name: {}", path.display())))?;

        let mime_type = infer::get_from_path(path)?.map(|kind| kind.mime_type().to_string());

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            mime_type,
            path: path.to_path_buf(),
        })
    }

    /// MIME type, or `"binary"` when unknown or empty
    pub fn mime_label(&self) -> &str {
        match self.mime_type.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => UNKNOWN_MIME_LABEL,
        }
    }
}

/// `"<name> • <size> KB • <type>"` with size in KiB to one decimal place
///
/// Halves round up (256 B is 0.3 KB), not to even.
pub fn human_file_meta(file: &SelectedFile) -> String {
    let tenths = (file.size_bytes as f64 * 10.0 / 1024.0).round();
    format!(
        "{} • {:.1} KB • {}",
        file.name,
        tenths / 10.0,
        file.mime_label()
    )
}
