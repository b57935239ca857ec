use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON body")]
    MalformedPayload,

    #[error("Missing required fields: name, email, category, categoryLabel")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("This email is already on the waitlist")]
    DuplicateEmail,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Storage backend unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
