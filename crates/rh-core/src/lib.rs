//! # rh-core
//!
//! Core types shared across all ResearchHub crates:
//! - Entity structs for remote-owned objects (workspaces, papers, users) and
//!   the client-owned `Document`
//! - Draft types carrying the required-field checks run before any create call
//! - Opaque id newtypes
//! - Source and chat-role enums
//! - Display helpers for author lists and long text
//! - Cross-cutting error type

pub mod display;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;

pub use errors::CoreError;
pub use ids::{DocumentId, PaperId, WorkspaceId};
