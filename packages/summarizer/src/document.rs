//! Loading source documents.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::InputError;

/// Encoding a document was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Windows1251,
}

/// A source document's text, immutable once loaded.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: Option<PathBuf>,
    pub encoding: SourceEncoding,
    text: String,
}

impl Document {
    /// Wrap text that is already in memory.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            path: None,
            encoding: SourceEncoding::Utf8,
            text: text.into(),
        }
    }

    /// Decode raw bytes: UTF-8 when valid, Windows-1251 otherwise.
    ///
    /// Older Russian e-books are commonly distributed in Windows-1251.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
        if !had_errors {
            return Self::from_text(text.into_owned());
        }

        let (text, _, _) = encoding_rs::WINDOWS_1251.decode(bytes);
        Self {
            path: None,
            encoding: SourceEncoding::Windows1251,
            text: text.into_owned(),
        }
    }

    /// Read and decode a document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let mut document = Self::from_bytes(&bytes);
        if document.encoding == SourceEncoding::Windows1251 {
            warn!(path = %path.display(), "Document is not valid UTF-8, decoded as Windows-1251");
        }
        debug!(
            path = %path.display(),
            chars = document.char_len(),
            "Document loaded"
        );

        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True when the document has no non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
