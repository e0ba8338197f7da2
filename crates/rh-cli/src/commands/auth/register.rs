use anyhow::Context;
use rh_core::entities::Registration;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RegisterArgs;
use crate::commands::shared::secret::password_or_stdin;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthRegisterResponse {
    registered: bool,
    email: String,
    next: &'static str,
}

pub async fn run(
    args: &RegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let registration = Registration {
        email: args.email.clone(),
        name: args.name.clone(),
        password: password_or_stdin(args.password.as_deref())?,
        institution: args.institution.clone(),
    };
    ctx.client
        .register(&registration)
        .await
        .context("registration failed")?;

    output(
        &AuthRegisterResponse {
            registered: true,
            email: registration.email,
            next: "rhub auth login --email <email>",
        },
        flags.format,
    )
}
