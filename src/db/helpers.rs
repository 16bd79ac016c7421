//! Small helpers shared by the store modules and the services on top of them.
//!
//! ```ignore
//! let fixture = require_record(fixtures::find_fixture(pool, id).await, "Fixture not found")?;
//! ```

use crate::services::error::ServiceError;

/// Postgres SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Unwrap an optional database result, mapping `None` to `ServiceError::NotFound`.
pub fn require_record<T>(
    result: Result<Option<T>, sqlx::Error>,
    not_found_message: &str,
) -> Result<T, ServiceError> {
    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(ServiceError::NotFound(not_found_message.to_string())),
        Err(e) => Err(ServiceError::Database(e)),
    }
}

/// Ensure a record does NOT exist, mapping `Some` to `ServiceError::Conflict`.
pub fn ensure_not_exists<T>(
    result: Result<Option<T>, sqlx::Error>,
    conflict_message: &str,
) -> Result<(), ServiceError> {
    match result {
        Ok(Some(_)) => Err(ServiceError::Conflict(conflict_message.to_string())),
        Ok(None) => Ok(()),
        Err(e) => Err(ServiceError::Database(e)),
    }
}

/// Map a write that affected no rows to `ServiceError::NotFound`.
pub fn require_affected(rows_affected: u64, not_found_message: &str) -> Result<(), ServiceError> {
    if rows_affected == 0 {
        return Err(ServiceError::NotFound(not_found_message.to_string()));
    }
    Ok(())
}

pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db_error| db_error.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}
