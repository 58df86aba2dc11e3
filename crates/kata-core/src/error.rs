use thiserror::Error;

#[derive(Debug, Error)]
pub enum KataError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal invariant violated: {0}")]
    Logic(String),

    #[error("input of length {len} exceeds the table limit of {max}")]
    TooLarge { len: usize, max: usize },

    #[error("arithmetic overflow: {0}")]
    Overflow(String),
}

pub type KataResult<T> = Result<T, KataError>;
