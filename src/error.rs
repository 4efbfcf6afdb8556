//! Error types
//!
//! Storage access is the only runtime operation that can fail. Callers catch
//! and log these; none of them reach the page.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage access denied: {0}")]
    Denied(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
