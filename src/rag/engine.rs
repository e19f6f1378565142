//! Knowledge loading and chunking.
//!
//! The knowledge base is a single text file, read once at startup and split
//! into overlapping fixed-size character windows.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::IndexBuildError;

/// The raw knowledge document. Discarded after chunking.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub source: String,
}

/// Chunking parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between consecutive chunks.
    pub chunk_overlap: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

/// A text chunk with source information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunk {
    /// The text content.
    pub text: String,
    /// Source identifier (the knowledge file path).
    pub source: String,
    /// Character offset in the original document.
    pub start_offset: usize,
    /// Chunk index within the source.
    pub chunk_index: usize,
}

/// Read the knowledge file as UTF-8.
pub fn load_knowledge(path: &Path) -> Result<Document, IndexBuildError> {
    let text = std::fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Err(IndexBuildError::EmptyDocument);
    }

    Ok(Document {
        text,
        source: path.display().to_string(),
    })
}

/// Split the document into overlapping chunks.
///
/// Windows advance by `chunk_size - chunk_overlap` characters, so
/// consecutive chunks overlap by exactly `chunk_overlap` characters (the
/// final chunk may be shorter) and every character lands in at least one
/// chunk. Offsets are in characters, not bytes.
pub fn split_into_chunks(document: &Document, config: &ChunkerConfig) -> Vec<TextChunk> {
    let chars: Vec<char> = document.text.chars().collect();
    let chunk_size = config.chunk_size.max(1);
    let step = chunk_size.saturating_sub(config.chunk_overlap).max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut chunk_index = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(TextChunk {
            text: chars[start..end].iter().collect(),
            source: document.source.clone(),
            start_offset: start,
            chunk_index,
        });

        if end == chars.len() {
            break;
        }
        start += step;
        chunk_index += 1;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn doc(text: &str) -> Document {
        Document {
            text: text.to_string(),
            source: "test".to_string(),
        }
    }

    #[test]
    fn consecutive_chunks_overlap_exactly() {
        let config = ChunkerConfig {
            chunk_size: 100,
            chunk_overlap: 20,
        };
        let text: String = ('a'..='z').cycle().take(450).collect();
        let chunks = split_into_chunks(&doc(&text), &config);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].text.chars().rev().take(20).collect();
            let tail: String = tail.chars().rev().collect();
            let head: String = pair[1].text.chars().take(20).collect();
            assert_eq!(tail, head);
            assert_eq!(pair[1].start_offset, pair[0].start_offset + 80);
        }
    }

    #[test]
    fn every_character_appears_in_some_chunk() {
        let config = ChunkerConfig {
            chunk_size: 7,
            chunk_overlap: 3,
        };
        let text = "0123456789abcdefghij";
        let chunks = split_into_chunks(&doc(text), &config);

        let mut covered = vec![false; text.chars().count()];
        for chunk in &chunks {
            for offset in 0..chunk.text.chars().count() {
                covered[chunk.start_offset + offset] = true;
            }
        }
        assert!(covered.iter().all(|seen| *seen));

        // Reassembling from offsets reproduces the document.
        for chunk in &chunks {
            let expected: String = text
                .chars()
                .skip(chunk.start_offset)
                .take(chunk.text.chars().count())
                .collect();
            assert_eq!(chunk.text, expected);
        }
    }

    #[test]
    fn short_document_is_a_single_chunk() {
        let chunks = split_into_chunks(&doc("petit document"), &ChunkerConfig::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "petit document");
        assert_eq!(chunks[0].start_offset, 0);
    }

    #[test]
    fn chunking_is_character_based_not_byte_based() {
        let config = ChunkerConfig {
            chunk_size: 4,
            chunk_overlap: 1,
        };
        let text = "éàüöéàüöéà";
        let chunks = split_into_chunks(&doc(text), &config);

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 4);
        }
    }

    #[test]
    fn overlap_larger_than_chunk_still_advances() {
        let config = ChunkerConfig {
            chunk_size: 5,
            chunk_overlap: 10,
        };
        let chunks = split_into_chunks(&doc("abcdefghij"), &config);
        // Step clamps to one character; the loop terminates.
        assert!(chunks.len() <= 10);
        assert_eq!(chunks.last().map(|c| c.text.contains('j')), Some(true));
    }

    #[test]
    fn missing_knowledge_file_is_an_error() {
        let err = load_knowledge(Path::new("/nonexistent/knowledge_base.txt"))
            .expect_err("should fail");
        assert!(matches!(err, IndexBuildError::Knowledge(_)));
    }

    #[test]
    fn blank_knowledge_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "   \n\t ").expect("write");
        let err = load_knowledge(file.path()).expect_err("should fail");
        assert!(matches!(err, IndexBuildError::EmptyDocument));
    }
}
