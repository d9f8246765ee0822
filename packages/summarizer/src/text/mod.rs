//! Pure text transforms: sentence splitting, chunking, sanitization of
//! model output, language conformance and input normalization.

pub mod chunker;
pub mod conformance;
pub mod normalize;
pub mod sanitize;
pub mod splitter;

pub use chunker::chunk_text;
pub use conformance::{forbidden_token_count, is_conformant, MIN_WORDS_CHECKED};
pub use normalize::normalize_document;
pub use sanitize::{sanitize, RemovalScope, SanitizeRule, FILLER_PHRASES, REASONING_TAGS};
pub use splitter::split_sentences;
