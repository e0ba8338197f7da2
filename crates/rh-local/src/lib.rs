//! # rh-local
//!
//! Client-local persistence. Nothing here is ever sent to the remote API.
//!
//! - [`LocalStorage`]: string key-value pairs in `<data_dir>/storage.json`
//! - [`TokenStore`]: the session token (`auth_token` plus legacy `token`)
//! - [`DocumentStore`]: DocSpace documents under `docspace_documents`

mod documents;
mod error;
mod storage;
mod token;

pub use documents::{DOCUMENTS_KEY, DocumentStore};
pub use error::LocalError;
pub use storage::LocalStorage;
pub use token::{LEGACY_TOKEN_KEY, TOKEN_ENV_VAR, TOKEN_KEY, TokenSource, TokenStore};
