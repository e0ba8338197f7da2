use std::path::Path;

use anyhow::Context;
use rh_core::DocumentId;
use rh_core::display::truncate_text;
use rh_core::entities::Document;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DocsCommands;
use crate::context::AppContext;
use crate::output::output;

const PREVIEW_CHARS: usize = 60;

#[derive(Serialize)]
struct DocumentRow {
    id: String,
    title: String,
    created_at: String,
    preview: String,
}

impl From<&Document> for DocumentRow {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.to_string(),
            title: doc.title.clone(),
            created_at: doc.created_at.format("%Y-%m-%d %H:%M").to_string(),
            preview: truncate_text(&strip_tags(&doc.content), PREVIEW_CHARS),
        }
    }
}

#[derive(Serialize)]
struct DocsListResponse {
    count: usize,
    documents: Vec<DocumentRow>,
}

#[derive(Serialize)]
struct DocsDeleteResponse {
    deleted: String,
    title: String,
}

#[derive(Serialize)]
struct DocsExportResponse {
    id: String,
    path: String,
}

/// Handle `rhub docs <subcommand>`. Documents never leave this machine.
pub fn handle(action: &DocsCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut store = ctx.documents()?;
    match action {
        DocsCommands::List => {
            let documents = store.list().iter().map(DocumentRow::from).collect::<Vec<_>>();
            output(
                &DocsListResponse {
                    count: documents.len(),
                    documents,
                },
                flags.format,
            )
        }
        DocsCommands::New { title } => output(&store.create(title)?, flags.format),
        DocsCommands::Show { id } => output(store.open_document(&DocumentId::new(id.as_str()))?, flags.format),
        DocsCommands::Save {
            id,
            title,
            content,
            content_file,
        } => {
            let id = DocumentId::new(id.as_str());
            let content = match (content, content_file) {
                (Some(content), _) => content.clone(),
                (None, Some(path)) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {path}"))?,
                (None, None) => anyhow::bail!("--content or --content-file is required"),
            };
            let title = match title {
                Some(title) => title.clone(),
                None => store.open_document(&id)?.title.clone(),
            };
            output(&store.save(&id, &title, &content)?, flags.format)
        }
        DocsCommands::Delete { id } => {
            let removed = store.delete(&DocumentId::new(id.as_str()))?;
            output(
                &DocsDeleteResponse {
                    deleted: removed.id.to_string(),
                    title: removed.title,
                },
                flags.format,
            )
        }
        DocsCommands::Export { id, dir } => {
            let path = store.export(&DocumentId::new(id.as_str()), Path::new(dir))?;
            output(
                &DocsExportResponse {
                    id: id.clone(),
                    path: path.display().to_string(),
                },
                flags.format,
            )
        }
    }
}

/// Plain-text view of stored HTML, for one-line previews.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rh_core::DocumentId;
    use rh_core::entities::Document;

    use super::{DocumentRow, strip_tags};

    #[test]
    fn tags_are_dropped_and_whitespace_collapsed() {
        assert_eq!(
            strip_tags("<h1>Notes</h1>\n<p>Transformers <b>scale</b>.</p>"),
            "Notes Transformers scale ."
        );
        assert_eq!(strip_tags(""), "");
    }

    #[test]
    fn preview_is_short_plain_text() {
        let doc = Document {
            id: DocumentId::new("1700000000000"),
            title: "Draft".into(),
            content: format!("<p>{}</p>", "word ".repeat(40)),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single().expect("valid date"),
        };
        let row = DocumentRow::from(&doc);
        assert_eq!(row.created_at, "2024-03-01 09:30");
        assert!(row.preview.ends_with("..."));
        assert!(!row.preview.contains('<'));
    }
}
