use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No user is currently logged in")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Errors caused by what the user typed, as opposed to storage faults.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidInput(_)
                | AppError::DuplicateUsername(_)
                | AppError::InvalidCredentials
                | AppError::NotFound(_)
                | AppError::Unauthorized
        )
    }

    /// Process exit code used by the command line front end.
    pub fn exit_code(&self) -> i32 {
        if self.is_user_error() {
            1
        } else {
            2
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
