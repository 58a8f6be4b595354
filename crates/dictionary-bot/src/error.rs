//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Matrix error: {0}")]
    Matrix(#[from] matrix_client::MatrixError),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
