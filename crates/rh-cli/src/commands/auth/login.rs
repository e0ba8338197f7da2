use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LoginArgs;
use crate::commands::shared::secret::password_or_stdin;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    email: String,
    stored_at: String,
}

pub async fn run(args: &LoginArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let password = password_or_stdin(args.password.as_deref())?;
    let token = ctx
        .client
        .login(&args.email, &password)
        .await
        .context("login failed")?;
    ctx.tokens
        .store(&token)
        .context("logged in, but the token could not be saved")?;
    tracing::info!(email = %args.email, "logged in");

    output(
        &AuthLoginResponse {
            authenticated: true,
            email: args.email.clone(),
            stored_at: ctx.storage.path().display().to_string(),
        },
        flags.format,
    )
}
