use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize, Default)]
struct AuthStatusResponse {
    authenticated: bool,
    email: Option<String>,
    name: Option<String>,
    institution: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = match ctx.tokens.load_with_source()? {
        None => AuthStatusResponse {
            note: Some("no token; run `rhub auth login`".into()),
            ..AuthStatusResponse::default()
        },
        Some((_, source)) => match ctx.client.current_user().await {
            Ok(user) => AuthStatusResponse {
                authenticated: true,
                email: Some(user.email),
                name: Some(user.name),
                institution: user.institution,
                token_source: Some(source.as_str()),
                note: None,
            },
            Err(error) if error.is_auth_failure() => AuthStatusResponse {
                token_source: Some(source.as_str()),
                note: Some(format!("token rejected: {error}")),
                ..AuthStatusResponse::default()
            },
            Err(error) => return Err(error.into()),
        },
    };

    output(&status, flags.format)
}
