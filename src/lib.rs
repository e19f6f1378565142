pub mod chatbot;
pub mod config;
pub mod core;
pub mod llm;
pub mod logging;
pub mod rag;
pub mod server;
pub mod state;
pub mod vector_math;
