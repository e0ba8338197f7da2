//! Prompt text sent to the chat endpoint.
//!
//! The wording is part of the contract with the segmentation in
//! [`crate::segment`]: the batch prompt asks for blank-line separated
//! `Paper X:` / `Summary:` blocks.

use rh_core::entities::Paper;

pub const NO_ABSTRACT: &str = "No abstract";

pub const UPLOAD_SUMMARY_QUESTION: &str = "Provide a comprehensive summary of this research paper in 5-7 bullet points. Include: 1) Main topic, 2) Key findings, 3) Methodology, 4) Conclusions.";

#[must_use]
pub fn batch_summary_question(count: usize) -> String {
    format!(
        "Provide a concise summary (2-3 sentences each) for each of the following {count} research papers. Format each summary as:\n\nPaper X: [Title]\nSummary: [Your summary]\n\nPapers:"
    )
}

#[must_use]
pub fn insights_question(count: usize) -> String {
    format!(
        "Extract key insights, trends, and findings from these {count} research papers. Provide actionable insights and identify patterns."
    )
}

#[must_use]
pub fn review_question(count: usize) -> String {
    format!(
        "Generate a comprehensive literature review for these {count} research papers. Include: 1) Overview, 2) Key findings, 3) Research gaps, 4) Conclusions."
    )
}

/// Numbered listing of papers for the batch summary prompt.
#[must_use]
pub fn batch_context(papers: &[Paper]) -> String {
    papers
        .iter()
        .enumerate()
        .map(|(index, paper)| {
            let abstract_text = paper
                .abstract_text
                .as_deref()
                .filter(|a| !a.is_empty())
                .unwrap_or(NO_ABSTRACT);
            format!(
                "\n\nPaper {}: \"{}\"\nAuthors: {}\nAbstract: {abstract_text}",
                index + 1,
                paper.title,
                paper.authors
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `"{title}: {abstract}"` per paper, separated by blank lines.
#[must_use]
pub fn papers_context(papers: &[Paper]) -> String {
    papers
        .iter()
        .map(|paper| format!("{}: {}", paper.title, paper.abstract_or_empty()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
