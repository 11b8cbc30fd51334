//! Error handling for the application

use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code: 2 for bad input, 1 for everything else
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Pricing(_) | AppError::InvalidArgument(_) | AppError::Json(_) => 2,
            AppError::Io(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
