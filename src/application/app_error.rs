use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("Invalid Form Data")]
    InvalidFormData,
    #[error("Validation failed: {errors}")]
    Validation {
        errors: ValidationErrors,
        fields: serde_json::Value,
    },
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Please provide a message")]
    EmptyKudoMessage,
    #[error("You cannot send kudos to yourself")]
    SelfKudoNotAllowed,
    #[error("Invalid color `{0}`")]
    InvalidColor(String),
    #[error("Invalid emoji `{0}`")]
    InvalidEmoji(String),
    #[error("Invalid department `{0}`")]
    InvalidDepartment(String),
    #[error("User already exists with that email")]
    EmailAlreadyTaken,
    #[error("Unsupported image format")]
    UnsupportedImageFormat,
    #[error("Image is larger than {0} bytes")]
    AvatarTooLarge(usize),

    // Not found
    #[error("User not found")]
    UserNotFound,
    #[error("No recipient found...")]
    RecipientNotFound,
    #[error("File not found")]
    StorageNotFound,

    // Auth
    #[error("Invalid Credentials")]
    InvalidCredentials,

    // Store
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Session already committed")]
    SessionAlreadyCommitted,
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Password hashing failed")]
    PasswordHashError,
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Postgres `foreign_key_violation`.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            AppError::DatabaseError(sqlx::Error::Database(db)) => db.code().as_deref() == Some("23503"),
            _ => false,
        }
    }
}
