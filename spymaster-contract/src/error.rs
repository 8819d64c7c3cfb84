use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("verification failed: {0}")]
    VerificationFailure(String),

    #[error("state store error: {0}")]
    Store(String),

    #[error("invalid contract state: {0}")]
    InvalidState(String),
}

impl From<anyhow::Error> for ContractError {
    fn from(err: anyhow::Error) -> Self {
        ContractError::Store(format!("{err:#}"))
    }
}

impl From<std::io::Error> for ContractError {
    fn from(err: std::io::Error) -> Self {
        ContractError::Store(err.to_string())
    }
}
