// Transaction Helpers
//
// The write paths report the logical error, not a rollback failure; a
// rollback that itself fails leaves nothing actionable for the caller, so
// it is logged and swallowed here. Dropping a sqlx transaction would also
// roll back, but the explicit call keeps the pre-error state restored
// before the typed error (and the write lock) leaves the repository.

use sqlx::{Sqlite, Transaction};
use tracing::warn;

pub(crate) async fn rollback(tx: Transaction<'_, Sqlite>, operation: &str) {
    if let Err(e) = tx.rollback().await {
        warn!(operation, error = %e, "Rollback failed");
    }
}
