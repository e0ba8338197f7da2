use rh_client::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("select at least one paper first")]
    NoPapers,

    #[error("validation error: {0}")]
    Validation(String),
}
