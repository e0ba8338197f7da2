use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Exchange email and password for an access token and store it.
    Login(LoginArgs),
    /// Create an account.
    Register(RegisterArgs),
    /// Forget the stored token.
    Logout,
    /// Show where the token comes from and who it belongs to.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    /// Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub name: String,
    /// Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub institution: Option<String>,
}
