use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid dice pool: {0}")]
    InvalidPoolSize(String),

    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Unknown specialization: {0}")]
    UnknownSpecialization(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
