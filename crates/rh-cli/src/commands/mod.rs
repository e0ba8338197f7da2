pub mod ai;
pub mod auth;
pub mod dispatch;
pub mod docs;
pub mod health;
pub mod import;
pub mod paper;
pub mod search;
pub mod shared;
pub mod upload;
pub mod workspace;
