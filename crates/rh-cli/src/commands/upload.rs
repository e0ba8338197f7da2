use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use rh_client::{PaperCatalog, PdfUpload};
use rh_core::WorkspaceId;
use rh_core::entities::Paper;
use rh_mirror::{save_uploaded_paper, uploaded_paper_draft};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UploadArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct UploadResponse {
    file: String,
    characters: usize,
    summary: Option<String>,
    saved: Option<Paper>,
}

/// Handle `rhub upload`.
pub async fn handle(args: &UploadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let upload = PdfUpload::from_path(Path::new(&args.file))?;
    let file_name = upload.file_name.clone();
    let text = ctx
        .client
        .extract_pdf(upload)
        .await
        .with_context(|| format!("text extraction failed for {file_name}"))?;

    // A failed summary still lets the paper be saved with an excerpt.
    let summary = if args.summarize {
        match ctx.assistant().summarize_extracted(&text).await {
            Ok(summary) => Some(summary),
            Err(error) => {
                tracing::warn!(%error, file = %file_name, "summary unavailable");
                None
            }
        }
    } else {
        None
    };

    let saved = match &args.workspace {
        Some(workspace) => {
            let draft = uploaded_paper_draft(&file_name, &text, summary.as_deref(), Utc::now());
            let paper =
                save_uploaded_paper(ctx.client.as_ref(), &WorkspaceId::new(workspace.as_str()), &draft)
                    .await
                    .with_context(|| format!("failed to save {file_name} to workspace {workspace}"))?;
            Some(paper)
        }
        None => None,
    };

    output(
        &UploadResponse {
            file: file_name,
            characters: text.chars().count(),
            summary,
            saved,
        },
        flags.format,
    )
}
