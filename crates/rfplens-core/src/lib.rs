//! rfplens Core Library
//!
//! Core functionality for the rfplens RFP analysis assistant.
//!
//! # Features
//! - PDF ingestion with overlapping character chunking
//! - SQLite-backed vector store with cosine similarity search
//! - Bounded generate/critique revision loop over an injected chat model
//! - Question routing across technical and business personas
//! - Executive brief generation and markdown report export

pub mod agent;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod llm;
pub mod retrieval;

pub use agent::{
    Analyst, AskOutcome, BriefWriter, Category, ChatOutcome, ChatPipeline, ConversationTurn,
    HistoryTurn, LoopOutcome, RevisionLoop, RevisionOptions, Router, TerminalState, Verdict,
};
pub use config::{AgentConfig, ApprovalPolicy, Config, IngestConfig, LlmServiceConfig, RetrievalConfig};
pub use db::Database;
pub use error::{Error, Result, RfpLensError};
pub use ingest::{IngestReport, Ingestor, PdfExtractor};
pub use llm::{ChatMessage, ChatModel, Embedder, OpenAiClient};
pub use retrieval::{Passage, Retriever, VectorRetriever};

/// Default cache directory name
pub const CACHE_DIR_NAME: &str = "rfplens";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "rfplens";
