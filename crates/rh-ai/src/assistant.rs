//! Research tools built on the chat and review endpoints.

use std::sync::Arc;

use rh_client::AiBackend;
use rh_core::entities::{Paper, PaperSummary};

use crate::error::AiError;
use crate::prompts;
use crate::segment::split_summaries;

/// Minimum extracted text length worth summarizing.
pub const MIN_SUMMARY_INPUT_CHARS: usize = 50;

const REPORT_RULE_WIDTH: usize = 50;

/// Batch summaries plus the raw answer they were cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummaries {
    pub summaries: Vec<PaperSummary>,
    pub full_text: String,
}

pub struct AiAssistant<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: AiBackend + ?Sized> AiAssistant<B> {
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// One chat call for all papers, split per paper.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NoPapers`] for an empty selection or
    /// [`AiError::Client`] if the call fails. A badly formatted answer is
    /// never an error.
    pub async fn summarize_batch(&self, papers: &[Paper]) -> Result<BatchSummaries, AiError> {
        ensure_papers(papers)?;
        let answer = self
            .backend
            .chat(
                &prompts::batch_context(papers),
                &prompts::batch_summary_question(papers.len()),
            )
            .await?;
        let summaries = split_summaries(&answer, papers);
        tracing::debug!(papers = papers.len(), "batch summaries generated");
        Ok(BatchSummaries {
            summaries,
            full_text: answer,
        })
    }

    /// # Errors
    ///
    /// Returns [`AiError::NoPapers`] or [`AiError::Client`].
    pub async fn insights(&self, papers: &[Paper]) -> Result<String, AiError> {
        ensure_papers(papers)?;
        Ok(self
            .backend
            .chat(
                &prompts::papers_context(papers),
                &prompts::insights_question(papers.len()),
            )
            .await?)
    }

    /// Literature review written by the chat model from titles and
    /// abstracts.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NoPapers`] or [`AiError::Client`].
    pub async fn review_via_chat(&self, papers: &[Paper]) -> Result<String, AiError> {
        ensure_papers(papers)?;
        Ok(self
            .backend
            .chat(
                &prompts::papers_context(papers),
                &prompts::review_question(papers.len()),
            )
            .await?)
    }

    /// Literature review from the dedicated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NoPapers`] or [`AiError::Client`].
    pub async fn literature_review(&self, papers: &[Paper]) -> Result<String, AiError> {
        ensure_papers(papers)?;
        let ids: Vec<_> = papers.iter().map(|p| p.id.clone()).collect();
        Ok(self.backend.literature_review(&ids).await?)
    }

    /// Bullet-point summary of text extracted from an uploaded PDF.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Validation`] when the text is shorter than
    /// [`MIN_SUMMARY_INPUT_CHARS`], or [`AiError::Client`].
    pub async fn summarize_extracted(&self, text: &str) -> Result<String, AiError> {
        if text.chars().count() < MIN_SUMMARY_INPUT_CHARS {
            return Err(AiError::Validation(format!(
                "need at least {MIN_SUMMARY_INPUT_CHARS} characters of text to summarize"
            )));
        }
        Ok(self
            .backend
            .chat(text, prompts::UPLOAD_SUMMARY_QUESTION)
            .await?)
    }
}

fn ensure_papers(papers: &[Paper]) -> Result<(), AiError> {
    if papers.is_empty() {
        return Err(AiError::NoPapers);
    }
    Ok(())
}

/// Plain-text report: each title underlined with `=`, then its summary.
#[must_use]
pub fn render_summaries_report(summaries: &[PaperSummary]) -> String {
    let rule = "=".repeat(REPORT_RULE_WIDTH);
    summaries
        .iter()
        .map(|s| format!("{}\n{rule}\n{}\n\n", s.title, s.summary))
        .collect::<Vec<_>>()
        .join("\n")
}
