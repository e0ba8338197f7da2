use rh_client::ClientError;
use rh_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("validation error: {0}")]
    Validation(String),
}

impl From<CoreError> for MirrorError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::Validation(message),
            other => Self::Validation(other.to_string()),
        }
    }
}
