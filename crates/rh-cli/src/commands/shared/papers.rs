use rh_core::entities::Paper;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Compact paper line for table output.
#[derive(Debug, Serialize)]
pub struct PaperRow {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub published: String,
    pub source: String,
    pub citations: Option<u64>,
}

impl From<&Paper> for PaperRow {
    fn from(paper: &Paper) -> Self {
        Self {
            id: paper.id.to_string(),
            title: paper.title.clone(),
            authors: paper.byline(),
            published: paper.publication_date.clone().unwrap_or_default(),
            source: paper.source.clone().unwrap_or_default(),
            citations: paper.citation_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaperList<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    pub count: usize,
    pub papers: Vec<T>,
}

/// Full papers for json/raw, [`PaperRow`]s for tables.
pub fn output_papers(
    query: Option<String>,
    workspace: Option<String>,
    papers: &[Paper],
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let count = papers.len();
    if flags.format == OutputFormat::Table {
        let papers = papers.iter().map(PaperRow::from).collect::<Vec<_>>();
        output(&PaperList { query, workspace, count, papers }, flags.format)
    } else {
        let papers = papers.iter().collect::<Vec<&Paper>>();
        output(&PaperList { query, workspace, count, papers }, flags.format)
    }
}
