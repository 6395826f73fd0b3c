use bytes::Bytes;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::error::SpecError;

/// Immutable, owned spec document bytes.
///
/// Sources are drained once into a single buffer; every later reader (title
/// extraction, the generator) gets its own read-only view. Clones share the
/// buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SpecContent(Bytes);

impl SpecContent {
    /// Drain `reader` fully into an owned buffer.
    pub fn read_from<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(Self(Bytes::from(buf)))
    }

    /// Read a spec file into memory.
    pub fn from_path(path: &Path) -> Result<Self, SpecError> {
        Self::read_file(path).map_err(|e| SpecError::io(path, e))
    }

    /// Read a spec file, leaving the error for the caller to classify.
    pub fn read_file(path: &Path) -> std::io::Result<Self> {
        std::fs::read(path).map(Self::from)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// A fresh reader positioned at the start of the document.
    #[must_use]
    pub fn reader(&self) -> Cursor<Bytes> {
        Cursor::new(self.0.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for SpecContent {
    fn from(value: Vec<u8>) -> Self {
        Self(Bytes::from(value))
    }
}

impl From<String> for SpecContent {
    fn from(value: String) -> Self {
        Self(Bytes::from(value))
    }
}

impl From<&'static str> for SpecContent {
    fn from(value: &'static str) -> Self {
        Self(Bytes::from_static(value.as_bytes()))
    }
}

impl From<Bytes> for SpecContent {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for SpecContent {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
