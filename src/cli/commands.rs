// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `ask` and `extract`, and all
// their configurable flags.
//
// clap's derive macros generate help text, missing-argument
// errors, and type conversion automatically.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::application::pipeline::SelectionMode;
use crate::data::chunker::DEFAULT_MAX_CHUNK_LEN;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question about a PDF or HTML document
    Ask(AskArgs),

    /// Print the extracted text of a document (no question answered)
    Extract(ExtractArgs),
}

/// How the pipeline picks QA context from the document chunks
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SelectArg {
    /// TF-IDF-select the single most similar chunk (one model call)
    Tfidf,
    /// Answer every chunk and join the results (one call per chunk)
    All,
}

impl From<SelectArg> for SelectionMode {
    fn from(s: SelectArg) -> Self {
        match s {
            SelectArg::Tfidf => SelectionMode::TfidfBest,
            SelectArg::All   => SelectionMode::ConcatAll,
        }
    }
}

/// All arguments for the `ask` command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The PDF or HTML document to question
    #[arg(long)]
    pub file: PathBuf,

    /// The natural language question to answer
    #[arg(long)]
    pub question: String,

    /// Declared media type of the document (application/pdf or text/html).
    /// Guessed from the file extension when omitted.
    #[arg(long)]
    pub media_type: Option<String>,

    /// Maximum characters per context chunk
    #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_LEN)]
    pub max_chunk_len: usize,

    /// Chunk selection strategy
    #[arg(long, value_enum, default_value = "tfidf")]
    pub select: SelectArg,

    /// Directory holding the pretrained model assets
    #[arg(long, default_value = "model")]
    pub model_dir: String,
}

/// All arguments for the `extract` command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// The PDF or HTML document to extract text from
    #[arg(long)]
    pub file: PathBuf,

    /// Declared media type; guessed from the file extension when omitted
    #[arg(long)]
    pub media_type: Option<String>,
}
