mod ai;
mod auth;
mod docs;
mod paper;
mod workspace;

pub use ai::{AiCommands, PaperSelectionArgs};
pub use auth::{AuthCommands, LoginArgs, RegisterArgs};
pub use docs::DocsCommands;
pub use paper::PaperCommands;
pub use workspace::WorkspaceCommands;
