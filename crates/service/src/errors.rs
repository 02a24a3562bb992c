use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("answer {0:?} is not one of the provided choices")]
    InvalidAnswer(String),
    #[error("question {0} already exists")]
    DuplicateId(Uuid),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn storage(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Storage(format!("{}: {}", path.display(), err))
    }
}
