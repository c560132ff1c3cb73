//! Service wrappers: log each operation and translate core errors.

pub mod auth;
pub mod users;

use crate::error::{AppError, AppResult};

/// Run CPU-heavy work (bcrypt) off the async executor.
async fn blocking<T, F>(f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {e}")))?
}
