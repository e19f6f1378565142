//! Retrieval pipeline: knowledge loading, chunking, the in-memory vector
//! index, prompt rendering, and the startup build that ties them together.

pub mod engine;
pub mod index;
pub mod pipeline;
pub mod prompt;

pub use engine::{load_knowledge, split_into_chunks, ChunkerConfig, Document, TextChunk};
pub use index::{ScoredChunk, VectorIndex};
pub use pipeline::Retrieval;
