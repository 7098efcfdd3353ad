//! Mapping of sqlx failures onto the application error taxonomy.

use inkpress_core::error::{AppError, ErrorKind};

/// SQLSTATE codes that mean "retry the whole transaction".
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";
/// Unique violation. Under `SERIALIZABLE` it is raised when a concurrent
/// writer claimed the same key first; the retried unit of work then sees
/// the occupant and reports the precise conflict.
const UNIQUE_VIOLATION: &str = "23505";

/// Wrap a sqlx error, classifying concurrency aborts as `WriteConflict`.
pub fn map_sqlx(context: &str, err: sqlx::Error) -> AppError {
    let code = match &err {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    };

    match code.as_deref() {
        Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED | UNIQUE_VIOLATION) => {
            AppError::with_source(
                ErrorKind::WriteConflict,
                format!("{context}: concurrent update, retry the operation"),
                err,
            )
        }
        _ => AppError::with_source(ErrorKind::Database, context.to_string(), err),
    }
}

/// Closure form of [`map_sqlx`] for `map_err`.
pub fn db_err(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| map_sqlx(context, e)
}
