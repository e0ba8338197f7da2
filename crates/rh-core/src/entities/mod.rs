//! Entity structs for all ResearchHub domain objects.
//!
//! Workspaces, papers and users are owned by the remote API; `Document` is
//! owned by the client alone. All structs derive `Serialize`, `Deserialize`
//! and `JsonSchema`.

mod chat;
mod document;
mod paper;
mod summary;
mod user;
mod workspace;

pub use chat::ChatMessage;
pub use document::Document;
pub use paper::{Paper, PaperDraft};
pub use summary::PaperSummary;
pub use user::{Registration, User};
pub use workspace::{Workspace, WorkspaceDraft, WorkspaceOverview};
