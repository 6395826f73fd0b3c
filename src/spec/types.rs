use std::path::{Path, PathBuf};

use super::content::SpecContent;
use crate::error::{SpecError, TitleError};

/// Where a spec document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecReference {
    /// A file on disk, read on demand.
    Path(PathBuf),
    /// A logical filename with content already in memory.
    Inline {
        filename: String,
        content: SpecContent,
    },
}

impl SpecReference {
    #[must_use]
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    #[must_use]
    pub fn inline(filename: impl Into<String>, content: impl Into<SpecContent>) -> Self {
        Self::Inline {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Final path component, or the logical filename.
    pub fn filename(&self) -> Result<String, SpecError> {
        match self {
            SpecReference::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| SpecError::invalid_name(path.display().to_string())),
            SpecReference::Inline { filename, .. } => Ok(filename.clone()),
        }
    }

    /// Load the document bytes. Inline content is shared, not copied.
    pub fn content(&self) -> Result<SpecContent, TitleError> {
        match self {
            SpecReference::Path(path) => read_path(path),
            SpecReference::Inline { content, .. } => Ok(content.clone()),
        }
    }
}

fn read_path(path: &Path) -> Result<SpecContent, TitleError> {
    SpecContent::read_file(path).map_err(|source| TitleError::Io {
        path: path.to_path_buf(),
        source,
    })
}
