use anyhow::Context;
use rh_client::{PaperCatalog, SearchQuery};
use rh_core::entities::Paper;
use rh_core::enums::PaperSource;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::papers::output_papers;
use crate::context::AppContext;

/// Handle `rhub search`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let papers = run_search(args, ctx, flags).await?;
    output_papers(Some(args.query.clone()), None, &papers, flags)
}

/// Build the query from flags and configured defaults, then search.
pub async fn run_search(
    args: &SearchArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Vec<Paper>> {
    let general = &ctx.config.general;
    let source: PaperSource = args
        .source
        .as_deref()
        .unwrap_or(&general.default_source)
        .parse()?;
    let limit = effective_limit(args.max_results, flags.limit, general.default_limit);
    let query = SearchQuery::new(&args.query, source, limit)?;

    tracing::debug!(query = query.query(), source = %source, limit = query.limit(), "searching");
    ctx.client
        .search_papers(&query)
        .await
        .with_context(|| format!("search for '{}' failed", query.query()))
}
