use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IniqError {
    #[error("Settings file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Malformed line {line_number}: missing '=' separator in '{line}'")]
    MalformedLine { line_number: usize, line: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IniqError>;

impl IniqError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::MalformedLine { .. } => 3,
            _ => 1,
        }
    }
}
