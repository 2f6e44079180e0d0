// sqlx::Error -> AppError Mapping Helpers

use cinevault_core::error::AppError;

/// Map a read-path sqlx error to `AppError::Database`.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    AppError::Database(describe(&err))
}

/// Map a write-path sqlx error to `AppError::WriteFailed`. Callers roll the
/// enclosing transaction back before surfacing this.
pub(crate) fn map_write_error(err: sqlx::Error) -> AppError {
    AppError::WriteFailed(describe(&err))
}

// Extract database-specific error code and message.
// SQLite error codes: https://www.sqlite.org/rescode.html
fn describe(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                match code_str {
                    "2067" | "1555" => format!(
                        "Unique constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    ),
                    "787" | "3850" => format!(
                        "Foreign key constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    ),
                    "5" => format!("Database locked (SQLITE_BUSY): {}", db_err.message()),
                    "13" => format!("Database full: {}", db_err.message()),
                    _ => format!("Database error [{}]: {}", code_str, db_err.message()),
                }
            } else {
                format!("Database error: {}", db_err.message())
            }
        }
        sqlx::Error::RowNotFound => "Row not found".to_string(),
        sqlx::Error::ColumnNotFound(col) => format!("Column not found: {}", col),
        _ => err.to_string(),
    }
}
