//! Chunk type - an overlapping run of sentences.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A window of consecutive sentences, the unit of first-pass summarization.
///
/// Sentence positions refer to the sentence sequence of the whole document,
/// so neighbouring chunks can be compared for overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of this chunk in document order
    pub index: usize,

    /// Sentences joined with single spaces
    pub text: String,

    /// Document sentence positions covered by this chunk
    pub sentences: Range<usize>,

    /// How many leading sentences were carried over from the previous chunk
    pub overlap: usize,
}

impl Chunk {
    /// Number of sentences in this chunk, overlap included.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Sentence positions that first appear in this chunk.
    pub fn fresh_sentences(&self) -> Range<usize> {
        self.sentences.start + self.overlap..self.sentences.end
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
