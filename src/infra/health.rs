//! Liveness checks for backing services.

use async_trait::async_trait;

use crate::errors::AppResult;

/// A backing service the `/health` endpoint reports on.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn ping(&self) -> AppResult<()>;
}
