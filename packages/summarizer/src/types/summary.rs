//! Summary types.

use serde::{Deserialize, Serialize};

/// Which part of the document a summary speaks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    /// Derived from nothing (the reduction of an empty sequence)
    Empty,

    /// Leaf summary of a single chunk
    Chunk { index: usize },

    /// Reduction over a contiguous span of chunks (inclusive)
    Chunks { first: usize, last: usize },
}

impl Provenance {
    /// Inclusive chunk span, if any.
    pub fn span(&self) -> Option<(usize, usize)> {
        match *self {
            Provenance::Empty => None,
            Provenance::Chunk { index } => Some((index, index)),
            Provenance::Chunks { first, last } => Some((first, last)),
        }
    }

    /// Smallest provenance covering every input.
    pub fn merge<'a>(items: impl IntoIterator<Item = &'a Provenance>) -> Provenance {
        let span = items
            .into_iter()
            .filter_map(Provenance::span)
            .reduce(|(a_first, a_last), (b_first, b_last)| {
                (a_first.min(b_first), a_last.max(b_last))
            });

        match span {
            None => Provenance::Empty,
            Some((first, last)) if first == last => Provenance::Chunk { index: first },
            Some((first, last)) => Provenance::Chunks { first, last },
        }
    }
}

/// An immutable summary produced at some recursion depth.
///
/// Level 1 is a leaf summary of a chunk; reductions carry the level at
/// which they were produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Sanitized summary text
    pub text: String,

    /// Recursion depth that produced this summary (>= 1)
    pub level: u32,

    pub provenance: Provenance,
}

impl Summary {
    /// Create a new summary.
    pub fn new(text: impl Into<String>, level: u32, provenance: Provenance) -> Self {
        Self {
            text: text.into(),
            level: level.max(1),
            provenance,
        }
    }

    /// Leaf summary of the chunk at `index`.
    pub fn leaf(text: impl Into<String>, index: usize) -> Self {
        Self::new(text, 1, Provenance::Chunk { index })
    }

    /// The empty summary, result of reducing nothing.
    pub fn empty(level: u32) -> Self {
        Self::new(String::new(), level, Provenance::Empty)
    }

    /// Replace the text, keeping level and provenance.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
