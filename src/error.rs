use thiserror::Error;

/// Custom error types for chatvec
#[derive(Error, Debug)]
pub enum ChatVecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Empty dataset: {message}")]
    EmptyDataset { message: String },

    #[error("Invalid hyperparameter: {field}: {message}")]
    InvalidParameter { field: String, message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Invalid model file: {message}")]
    InvalidModel { message: String },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl ChatVecError {
    /// Create an empty dataset error
    pub fn empty_dataset<S: Into<String>>(message: S) -> Self {
        Self::EmptyDataset {
            message: message.into(),
        }
    }

    /// Create an invalid hyperparameter error
    pub fn invalid_parameter<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid model error
    pub fn invalid_model<S: Into<String>>(message: S) -> Self {
        Self::InvalidModel {
            message: message.into(),
        }
    }
}

/// Result type alias for chatvec operations
pub type Result<T> = std::result::Result<T, ChatVecError>;
