use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserListError {
    /// Required input missing; detected locally, nothing was sent.
    #[error("validation failed: {0}")]
    Validation(&'static str),
    /// Transport failure, non-2xx status, or an undecodable body.
    #[error(transparent)]
    Request(#[from] anyhow::Error),
}

impl UserListError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
