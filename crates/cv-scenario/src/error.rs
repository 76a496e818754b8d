use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario ended early: expected {expected}")]
    UnexpectedEof { expected: String },

    #[error("token #{position} ({token:?}) is not a valid {field}")]
    InvalidNumber { field: String, token: String, position: usize },

    #[error("{field} {index} is out of range 1..={max}")]
    IndexOutOfRange { field: String, index: usize, max: usize },

    #[error("{count} unexpected tokens after the last request")]
    TrailingTokens { count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
