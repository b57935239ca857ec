use crate::app_error::AppError;

pub mod fallback;
pub mod file;
pub mod kv;
pub mod memory;
pub mod postgres;

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();
                // PostgreSQL unique violation: the only unique column is
                // email, so this is a duplicate signup racing past the
                // in-process dedupe.
                if msg.contains("duplicate key") || msg.contains("unique constraint") {
                    AppError::DuplicateEmail
                } else {
                    tracing::error!(error = ?err, "Database error");
                    AppError::StoreUnavailable("database operation failed".into())
                }
            }
            _ => {
                tracing::error!(error = ?err, "Database error");
                AppError::StoreUnavailable("database operation failed".into())
            }
        }
    }
}
