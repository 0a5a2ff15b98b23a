//! Configuration management

use crate::agent::router::Category;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM service configuration
    #[serde(default)]
    pub llm_service: LlmServiceConfig,

    /// Agent behavior (revision loop, router, context assembly)
    #[serde(default)]
    pub agent: AgentConfig,

    /// PDF ingestion parameters
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Retrieval parameters
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmServiceConfig {
    /// Base URL of the LLM service for chat/completions
    pub url: String,

    /// Model name for chat completions
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Base URL for embeddings service (can be different from LLM URL)
    #[serde(default)]
    pub embedding_url: Option<String>,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimensions
    #[serde(default = "default_embedding_dimensions")]
    pub embedding_dimensions: usize,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sampling temperature for completions
    #[serde(default)]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl LlmServiceConfig {
    /// Get the embeddings URL (falls back to main URL if not specified)
    pub fn embeddings_url(&self) -> &str {
        self.embedding_url.as_deref().unwrap_or(&self.url)
    }
}

impl Default for LlmServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("RFPLENS_LLM_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai".to_string()),
            model: default_chat_model(),
            embedding_url: std::env::var("RFPLENS_EMBEDDING_URL").ok(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: std::env::var("RFPLENS_EMBEDDING_DIMS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_embedding_dimensions),
            api_key: std::env::var("RFPLENS_LLM_API_KEY").ok(),
            temperature: 0.0,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_chat_model() -> String {
    std::env::var("RFPLENS_LLM_MODEL").unwrap_or_else(|_| "llama-3.1-8b-instant".to_string())
}

fn default_embedding_model() -> String {
    std::env::var("RFPLENS_EMBEDDING_MODEL")
        .unwrap_or_else(|_| "sentence-transformers/all-MiniLM-L6-v2".to_string())
}

fn default_embedding_dimensions() -> usize {
    384
}

fn default_timeout() -> u64 {
    30
}

/// How critique output is matched against the approval sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalPolicy {
    /// Case-sensitive substring match. A critique that merely mentions the
    /// sentinel approves the draft.
    #[default]
    Substring,
    /// The sentinel must appear as a standalone word.
    ExactToken,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum critique cycles before the loop gives up
    #[serde(default = "default_max_revisions")]
    pub max_revisions: u32,

    /// Literal token the critic emits to approve a draft
    #[serde(default = "default_approval_sentinel")]
    pub approval_sentinel: String,

    /// Sentinel matching policy
    #[serde(default)]
    pub approval_policy: ApprovalPolicy,

    /// Label used when classification output matches no known category
    #[serde(default = "default_fallback_category")]
    pub fallback_category: Category,

    /// How many trailing history turns feed the router and chat prompts
    #[serde(default = "default_history_turns")]
    pub history_turns: usize,

    /// Character budget for the assembled context block
    #[serde(default = "default_context_budget")]
    pub context_budget_chars: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_revisions: default_max_revisions(),
            approval_sentinel: default_approval_sentinel(),
            approval_policy: ApprovalPolicy::default(),
            fallback_category: default_fallback_category(),
            history_turns: default_history_turns(),
            context_budget_chars: default_context_budget(),
        }
    }
}

fn default_max_revisions() -> u32 {
    2
}

fn default_approval_sentinel() -> String {
    "APPROVE".to_string()
}

fn default_fallback_category() -> Category {
    Category::Technical
}

fn default_history_turns() -> usize {
    4
}

fn default_context_budget() -> usize {
    12_000
}

/// PDF ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Target chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Glob pattern for directory ingestion
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            pattern: default_pattern(),
        }
    }
}

fn default_chunk_size() -> usize {
    crate::ingest::chunker::CHUNK_SIZE_CHARS
}

fn default_chunk_overlap() -> usize {
    crate::ingest::chunker::CHUNK_OVERLAP_CHARS
}

fn default_pattern() -> String {
    "**/*.pdf".to_string()
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Passages retrieved per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Passages retrieved for executive brief generation
    #[serde(default = "default_brief_top_k")]
    pub brief_top_k: usize,

    /// Minimum cosine similarity for a passage to be returned
    #[serde(default)]
    pub min_score: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            brief_top_k: default_brief_top_k(),
            min_score: 0.0,
        }
    }
}

fn default_top_k() -> usize {
    4
}

fn default_brief_top_k() -> usize {
    10
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path, falling back to defaults if absent
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_defaults() {
        let agent = AgentConfig::default();
        assert_eq!(agent.max_revisions, 2);
        assert_eq!(agent.approval_sentinel, "APPROVE");
        assert_eq!(agent.approval_policy, ApprovalPolicy::Substring);
        assert_eq!(agent.fallback_category, Category::Technical);
        assert_eq!(agent.history_turns, 4);
    }

    #[test]
    fn test_ingest_defaults() {
        let ingest = IngestConfig::default();
        assert_eq!(ingest.chunk_size, 1000);
        assert_eq!(ingest.chunk_overlap, 200);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "agent:\n  max_revisions: 5\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.agent.max_revisions, 5);
        assert_eq!(config.agent.approval_sentinel, "APPROVE");
        assert_eq!(config.retrieval.top_k, 4);
    }

    #[test]
    fn test_approval_policy_yaml() {
        let yaml = "agent:\n  approval_policy: exact_token\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.agent.approval_policy, ApprovalPolicy::ExactToken);
    }
}
