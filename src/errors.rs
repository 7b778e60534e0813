use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermfsErrorType {
    NotFound,
    NotADirectory,
    IsADirectory,
    InvalidInput,
    DuplicateEntry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TermfsError {
    pub error_type: TermfsErrorType,
    pub message: String,
}

impl TermfsError {
    pub fn new(error_type: TermfsErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
        }
    }
}

impl std::fmt::Display for TermfsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.error_type, self.message)
    }
}

impl Error for TermfsError {}

pub type Result<T> = std::result::Result<T, TermfsError>;
