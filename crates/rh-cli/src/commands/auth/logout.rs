use rh_local::TOKEN_ENV_VAR;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

pub fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.tokens.clear()?;
    ctx.session.clear();

    let note = std::env::var_os(TOKEN_ENV_VAR)
        .map(|_| format!("{TOKEN_ENV_VAR} is still set and will be used next time"));
    output(&AuthLogoutResponse { cleared: true, note }, flags.format)
}
