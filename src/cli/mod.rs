// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction. Parses arguments
// with clap and delegates all business logic to Layer 2.
//
// Two commands are supported:
//   1. `ask`     — answers a question against one document
//   2. `extract` — dumps a document's extracted text
//
// This layer also owns the model lifecycle: the InferenceService
// is loaded before the pipeline runs and explicitly shut down
// after the answer is printed.

// Declare the commands submodule
pub mod commands;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{AskArgs, Commands, ExtractArgs};

use crate::application::pipeline::{PipelineConfig, QaPipeline, QaRequest};
use crate::data::{html::HtmlExtractor, pdf::PdfExtractor};
use crate::domain::document::MediaType;
use crate::domain::error::QaError;
use crate::domain::traits::TextExtractor;
use crate::ml::inferencer::InferenceService;

#[derive(Parser, Debug)]
#[command(
    name = "doc-qa",
    version = "0.1.0",
    about = "Ask questions about a PDF or HTML document using a pretrained extractive QA model."
)]
pub struct Cli {
    /// The subcommand to run (ask or extract)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch. This layer only routes
    /// and prints; it never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Ask(args)     => run_ask(args),
            Commands::Extract(args) => run_extract(args),
        }
    }
}

/// Handles the `ask` subcommand: load model, run the pipeline once,
/// print the answer, release the model.
fn run_ask(args: AskArgs) -> Result<()> {
    let document = fs::read(&args.file)
        .with_context(|| format!("cannot read '{}'", args.file.display()))?;
    let media_type = declared_media_type(args.media_type.as_deref(), &args.file)?;

    let service = InferenceService::load(&args.model_dir)?;

    let pipeline = QaPipeline::new(
        &service,
        PipelineConfig {
            max_chunk_len: args.max_chunk_len,
            selection:     args.select.into(),
        },
    );

    let request = QaRequest {
        document,
        media_type,
        question: args.question,
    };
    let response = pipeline.answer(&request)?;

    println!("\nAnswer: {}", response.answer);

    service.shutdown();
    Ok(())
}

/// Handles the `extract` subcommand: print the extracted text only.
fn run_extract(args: ExtractArgs) -> Result<()> {
    let document = fs::read(&args.file)
        .with_context(|| format!("cannot read '{}'", args.file.display()))?;
    let declared = declared_media_type(args.media_type.as_deref(), &args.file)?;

    let media_type = MediaType::from_mime(&declared)
        .ok_or(QaError::UnsupportedMediaType(declared))?;

    let text = match media_type {
        MediaType::Pdf  => PdfExtractor::new().extract(&document)?,
        MediaType::Html => HtmlExtractor::new().extract(&document)?,
    };

    println!("{text}");
    Ok(())
}

/// The media type the request declares: the explicit --media-type flag
/// when given, otherwise a guess from the file extension. The guess is
/// still validated by the pipeline's media type gate.
fn declared_media_type(explicit: Option<&str>, file: &Path) -> Result<String> {
    if let Some(mt) = explicit {
        return Ok(mt.to_string());
    }
    let guess = mime_guess::from_path(file)
        .first()
        .with_context(|| {
            format!(
                "cannot guess a media type for '{}'; pass --media-type",
                file.display()
            )
        })?;
    Ok(guess.essence_str().to_string())
}
