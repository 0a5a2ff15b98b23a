//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rfplens")]
#[command(
    author,
    version,
    about = "Analyze RFP documents with retrieval-augmented generation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a PDF file or a directory of PDFs
    Ingest(IngestArgs),

    /// Ask a question, improved through critique cycles
    Ask(AskArgs),

    /// Route a question and answer in the matching persona
    Chat(AskArgs),

    /// Generate or refine an executive brief
    Brief(BriefArgs),

    /// Render a chat history JSON file into a markdown report
    Report(ReportArgs),

    /// Show index status
    Status,
}

#[derive(Args)]
pub struct IngestArgs {
    /// PDF file or directory to ingest
    pub path: PathBuf,

    /// Glob pattern for directory ingestion
    #[arg(long)]
    pub pattern: Option<String>,
}

#[derive(Args)]
pub struct AskArgs {
    /// The question to answer
    pub question: Vec<String>,
}

impl AskArgs {
    pub fn question_text(&self) -> String {
        self.question.join(" ")
    }
}

#[derive(Args)]
pub struct ReportArgs {
    /// JSON file holding the chat history (array of {role, content})
    pub history: PathBuf,

    /// Output file
    #[arg(long, default_value = "rfp_analysis.md")]
    pub out: PathBuf,
}

#[derive(Args)]
pub struct BriefArgs {
    /// Refine this draft file instead of generating a new brief
    #[arg(long)]
    pub refine: Option<PathBuf>,

    /// Feedback to apply when refining
    #[arg(long, requires = "refine")]
    pub feedback: Option<String>,
}
