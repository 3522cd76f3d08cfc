//! Helpers shared by every call to an external collaborator.

use std::future::Future;
use std::time::Duration;

use crate::error::ServiceError;

/// Await `fut`, giving up after `after`.
///
/// Collaborator calls have no deadline of their own; a hung network call
/// would otherwise block the wizard indefinitely.
pub async fn with_timeout<T, F>(operation: &str, after: Duration, fut: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, ?after, "External call timed out");
            Err(ServiceError::Timeout {
                operation: operation.to_string(),
                after,
            })
        }
    }
}
