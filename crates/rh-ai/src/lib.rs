//! # rh-ai
//!
//! AI research tools over the chat and literature-review endpoints:
//! per-paper batch summaries, insights, literature reviews, summaries of
//! uploaded text, and a chat transcript about selected papers.
//!
//! Batch summaries come back as one answer and are cut into per-paper
//! pieces by [`split_summaries`], a best-effort heuristic that always
//! yields a non-empty summary per paper.

mod assistant;
mod chat;
mod error;
pub mod prompts;
mod segment;

pub use assistant::{AiAssistant, BatchSummaries, MIN_SUMMARY_INPUT_CHARS, render_summaries_report};
pub use chat::ChatSession;
pub use error::AiError;
pub use segment::{placeholder_summary, split_summaries};
