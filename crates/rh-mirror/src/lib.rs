//! # rh-mirror
//!
//! Client-side copies of remote collections and the optimistic mutation
//! controller that keeps them in step with the server.
//!
//! - [`LocalMirror`] / [`Selection`]: the ordered collection and the ids the
//!   user selected, pruned on every removal
//! - [`Collection`]: fetch/create/delete for one view, implemented by
//!   [`WorkspaceCollection`] (with paper counts) and [`WorkspacePapers`]
//! - [`OptimisticController`]: local-first deletes with background
//!   confirmation and resync on failure; remote-first creates
//! - [`OperationRegistry`]: ids for background work, with detach and settle
//! - [`import_entities`]: sequential import that stops at the first failure

mod collection;
mod controller;
mod error;
mod import;
mod mirror;
mod notice;
mod operations;
mod upload;

#[cfg(feature = "test-support")]
pub mod testing;

pub use collection::{Collection, WorkspaceCollection, WorkspacePapers};
pub use controller::{DeleteOutcome, OptimisticController};
pub use error::MirrorError;
pub use import::{ImportReport, import_entities};
pub use mirror::{Identified, LocalMirror, Selection};
pub use notice::{Notice, NoticeLevel, Notifier};
pub use operations::{Attachment, OperationId, OperationRegistry};
pub use upload::{
    EXCERPT_CHARS, UPLOADED_AUTHORS, UPLOADED_TITLE_FALLBACK, save_uploaded_paper,
    uploaded_paper_draft,
};
