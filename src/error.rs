use thiserror::Error;

pub type Result<T> = std::result::Result<T, PunchcardError>;

#[derive(Error, Debug)]
pub enum PunchcardError {
    #[error("Load error: {0}")]
    Load(String),
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
