//! # rh-client
//!
//! Remote store client for the ResearchHub API.
//!
//! - [`Session`]: the bearer token, shared by every clone of a client
//! - [`WorkspaceStore`], [`PaperCatalog`], [`AiBackend`]: capability traits,
//!   bundled as [`RemoteStore`]
//! - [`HttpRemoteStore`]: the reqwest implementation
//! - [`ClientError`]: failure classification (auth, not-found, rate limit,
//!   API, transport, payload shape)
//!
//! Payloads are decoded into wire structs and normalized into `rh_core`
//! entities before they leave this crate; malformed list entries are dropped
//! with a warning, malformed single objects are an error.

mod client;
mod error;
mod http;
mod session;
mod store;
pub mod wire;

pub use client::HttpRemoteStore;
pub use error::ClientError;
pub use session::Session;
pub use store::{
    AiBackend, MAX_SEARCH_LIMIT, PaperCatalog, PdfUpload, RemoteStore, SearchQuery, WorkspaceStore,
};
