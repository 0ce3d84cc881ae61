use crate::error::DeskError;

/// Run filesystem or workbook work on the blocking pool.
pub async fn run_blocking<F, T>(f: F) -> Result<T, DeskError>
where
    F: FnOnce() -> Result<T, DeskError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DeskError::UnexpectedError(format!("blocking task failed: {e}")))?
}
