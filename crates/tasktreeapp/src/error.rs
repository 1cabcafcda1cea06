use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskTreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Task is not deleted: {}", .0.display())]
    NotDeleted(PathBuf),

    #[error("Task is already deleted: {}", .0.display())]
    AlreadyDeleted(PathBuf),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Destination already exists: {}", .0.display())]
    Conflict(PathBuf),

    #[error("Invalid task path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, TaskTreeError>;
