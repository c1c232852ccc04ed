/// Recursive character text splitting for document ingestion
use std::collections::VecDeque;
use tracing::{debug, warn};

use crate::domain::base::{DomainError, DomainResult};

/// Separators tried in order, from coarsest to finest.
/// The empty separator splits into single characters.
const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Splits text into chunks of at most `chunk_size` characters
///
/// Text is split on the coarsest separator it contains; pieces that are still
/// too large are split again with the next separator. Small pieces are then
/// greedily merged back together up to the chunk size. Separators stay attached
/// to the start of the piece that follows them, and every chunk is trimmed.
#[derive(Debug, Clone)]
pub struct RecursiveTextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveTextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> DomainResult<Self> {
        if chunk_size == 0 {
            return Err(DomainError::InvalidValue(
                "Chunk size must be greater than zero".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(DomainError::InvalidValue(format!(
                "Chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(RecursiveTextSplitter {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Split text into chunks. Empty input produces no chunks.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chunks = self.split_recursive(text, &DEFAULT_SEPARATORS);
        debug!(
            "Split {} characters into {} chunks (size: {}, overlap: {})",
            char_len(text),
            chunks.len(),
            self.chunk_size,
            self.chunk_overlap
        );
        chunks
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let mut separator = separators.last().copied().unwrap_or("");
        let mut remaining: &[&str] = &[];

        for (i, candidate) in separators.iter().enumerate() {
            if candidate.is_empty() {
                separator = candidate;
                break;
            }
            if text.contains(candidate) {
                separator = candidate;
                remaining = &separators[i + 1..];
                break;
            }
        }

        let mut chunks = Vec::new();
        let mut small_pieces: Vec<&str> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(piece) < self.chunk_size {
                small_pieces.push(piece);
                continue;
            }

            if !small_pieces.is_empty() {
                chunks.extend(self.merge_pieces(&small_pieces));
                small_pieces.clear();
            }

            if remaining.is_empty() {
                chunks.push(piece.to_string());
            } else {
                chunks.extend(self.split_recursive(piece, remaining));
            }
        }

        if !small_pieces.is_empty() {
            chunks.extend(self.merge_pieces(&small_pieces));
        }

        chunks
    }

    /// Greedily combine pieces into chunks no longer than `chunk_size`,
    /// carrying at most `chunk_overlap` characters into the next chunk
    fn merge_pieces(&self, pieces: &[&str]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut window_len = 0;

        for piece in pieces {
            let piece_len = char_len(piece);

            if window_len + piece_len > self.chunk_size {
                if window_len > self.chunk_size {
                    warn!(
                        "Created a chunk of size {}, which is longer than the specified {}",
                        window_len, self.chunk_size
                    );
                }

                if !window.is_empty() {
                    if let Some(chunk) = join_trimmed(&window) {
                        chunks.push(chunk);
                    }

                    while window_len > self.chunk_overlap
                        || (window_len + piece_len > self.chunk_size && window_len > 0)
                    {
                        match window.pop_front() {
                            Some(dropped) => window_len -= char_len(dropped),
                            None => break,
                        }
                    }
                }
            }

            window.push_back(piece);
            window_len += piece_len;
        }

        if let Some(chunk) = join_trimmed(&window) {
            chunks.push(chunk);
        }

        chunks
    }
}

/// Split at every occurrence of `separator`, keeping the separator at the start
/// of the following piece. Empty pieces are dropped.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect();
    }

    let mut pieces = Vec::new();
    let mut start = 0;

    for (position, _) in text.match_indices(separator) {
        if position > start {
            pieces.push(&text[start..position]);
        }
        start = position;
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }

    pieces
}

fn join_trimmed(pieces: &VecDeque<&str>) -> Option<String> {
    let joined: String = pieces.iter().copied().collect();
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter(size: usize, overlap: usize) -> RecursiveTextSplitter {
        RecursiveTextSplitter::new(size, overlap).unwrap()
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(splitter(100, 0).split_text("").is_empty());
    }

    #[test]
    fn test_whitespace_only_text_yields_no_chunks() {
        assert!(splitter(100, 0).split_text("   \n\n  \n ").is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = splitter(100, 0).split_text("x^2 + 2x + 1 = 0");
        assert_eq!(chunks, vec!["x^2 + 2x + 1 = 0"]);
    }

    #[test]
    fn test_text_without_separators_splits_by_character() {
        let text = "a".repeat(250);
        let chunks = splitter(100, 0).split_text(&text);

        let lengths: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(lengths, vec![100, 100, 50]);
    }

    #[test]
    fn test_chunk_count_is_ceiling_of_length() {
        let s = splitter(100, 0);
        assert_eq!(s.split_text(&"b".repeat(100)).len(), 1);
        assert_eq!(s.split_text(&"b".repeat(101)).len(), 2);
        assert_eq!(s.split_text(&"b".repeat(1000)).len(), 10);
    }

    #[test]
    fn test_words_are_merged_greedily() {
        let chunks = splitter(7, 0).split_text("one two three");
        assert_eq!(chunks, vec!["one two", "three"]);
    }

    #[test]
    fn test_paragraphs_split_before_lines() {
        let chunks = splitter(12, 0).split_text("para one.\n\npara two.");
        assert_eq!(chunks, vec!["para one.", "para two."]);
    }

    #[test]
    fn test_long_paragraph_falls_back_to_finer_separators() {
        let text = format!("short\n\n{}", "word ".repeat(10).trim_end());
        let chunks = splitter(20, 0).split_text(&text);

        assert_eq!(chunks[0], "short");
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20, "chunk too long: {:?}", chunk);
        }
        let rejoined: Vec<&str> = chunks[1..].iter().flat_map(|c| c.split(' ')).collect();
        assert_eq!(rejoined.len(), 10);
    }

    #[test]
    fn test_chunks_never_exceed_size() {
        let text = "Solve for x: 3x + 5 = 20.\nThen compute the integral of x^2 from 0 to 3.\n\n\
                    A train leaves the station at 60 km/h while another leaves an hour later at 90 km/h.";
        for chunk in splitter(30, 0).split_text(text) {
            assert!(chunk.chars().count() <= 30);
            assert_eq!(chunk, chunk.trim());
        }
    }

    #[test]
    fn test_multibyte_characters_are_counted_as_characters() {
        let text = "π".repeat(150);
        let chunks = splitter(100, 0).split_text(&text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 100);
        assert_eq!(chunks[1].chars().count(), 50);
    }

    #[test]
    fn test_overlap_repeats_trailing_pieces() {
        let chunks = splitter(10, 4).split_text("aa bb cc dd ee");
        assert_eq!(chunks, vec!["aa bb cc", "cc dd ee"]);
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        assert!(RecursiveTextSplitter::new(0, 0).is_err());
        assert!(RecursiveTextSplitter::new(10, 10).is_err());
        assert!(RecursiveTextSplitter::new(10, 9).is_ok());
    }

    #[test]
    fn test_split_keeping_separator() {
        assert_eq!(
            split_keeping_separator("a b  c", " "),
            vec!["a", " b", " ", " c"]
        );
        assert_eq!(split_keeping_separator(" a", " "), vec![" a"]);
        assert_eq!(split_keeping_separator("ab", ""), vec!["a", "b"]);
    }
}
