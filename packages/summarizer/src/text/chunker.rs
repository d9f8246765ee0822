//! Overlapping sentence-window chunking.

use crate::text::splitter::split_sentences;
use crate::types::chunk::Chunk;

/// Group the sentences of `text` into overlapping chunks of roughly
/// `target_size` characters.
///
/// Sentences accumulate until the running length (each sentence counted
/// with one separating space) reaches `target_size`; the buffer is then
/// emitted and its last `overlap_sentences` sentences are carried into the
/// next chunk. Whatever remains at the end is emitted regardless of size.
/// Sentences are never split, so an oversized sentence forms its own chunk.
pub fn chunk_text(text: &str, target_size: usize, overlap_sentences: usize) -> Vec<Chunk> {
    let sentences = split_sentences(text);
    let mut chunks = Vec::new();

    // Buffer holds sentence positions; they are always contiguous.
    let mut buffer: Vec<usize> = Vec::new();
    let mut length = 0;
    let mut carry: Vec<usize> = Vec::new();
    let mut carried = 0;

    for (position, sentence) in sentences.iter().enumerate() {
        if !carry.is_empty() {
            length += carry
                .iter()
                .map(|&i| measure(sentences[i]))
                .sum::<usize>();
            carried = carry.len();
            buffer.append(&mut carry);
        }

        buffer.push(position);
        length += measure(sentence);

        if length >= target_size {
            let keep = overlap_sentences.min(buffer.len());
            carry = buffer[buffer.len() - keep..].to_vec();
            chunks.push(build_chunk(chunks.len(), &sentences, &buffer, carried));

            buffer.clear();
            length = 0;
            carried = 0;
        }
    }

    if !buffer.is_empty() {
        chunks.push(build_chunk(chunks.len(), &sentences, &buffer, carried));
    }

    chunks
}

/// Characters a sentence contributes to a chunk, separator included.
fn measure(sentence: &str) -> usize {
    sentence.chars().count() + 1
}

fn build_chunk(index: usize, sentences: &[&str], buffer: &[usize], overlap: usize) -> Chunk {
    let first = buffer[0];
    let end = buffer[buffer.len() - 1] + 1;

    Chunk {
        index,
        text: sentences[first..end].join(" "),
        sentences: first..end,
        overlap,
    }
}
