pub mod deletes;
pub mod limit;
pub mod notices;
pub mod papers;
pub mod secret;
pub mod selection;
