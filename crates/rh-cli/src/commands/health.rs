use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct HealthResponse {
    base_url: String,
    status: String,
}

/// Handle `rhub health`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = ctx.client.health().await?;
    output(
        &HealthResponse {
            base_url: ctx.client.base_url().to_string(),
            status,
        },
        flags.format,
    )
}
