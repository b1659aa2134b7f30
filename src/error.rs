use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// An entropy source error.
    #[error("Entropy error: {0}")]
    Entropy(#[from] rand::Error),

    /// An invalid plugin CSP directive error.
    #[error("Invalid CSP directive: {0}")]
    InvalidDirective(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;
