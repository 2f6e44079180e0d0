// Process-wide Write Serialization

use tokio::sync::{Mutex, MutexGuard};

/// Serializes every write transaction in the process.
///
/// SQLite does not tolerate interleaved multi-statement write transactions
/// from one process, so entity + association writes need external
/// serialization on top of the store's own locking. One instance is created
/// next to the pool and shared (via `Arc`) by every repository; reads never
/// touch it.
///
/// The guard is held across the whole open -> commit/rollback window and is
/// released on drop, so the lock is freed on every exit path.
#[derive(Debug, Default)]
pub struct WriteLock {
    inner: Mutex<()>,
}

impl WriteLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
