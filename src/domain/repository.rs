use std::time::Duration;

use super::entity::Job;

#[async_trait::async_trait]
pub trait JobQueue: Clone + Send + Sync + 'static {
    async fn enqueue(&self, job: Job);

    /// Waits up to `timeout` for a job. `None` means nothing arrived in time.
    async fn dequeue(&self, timeout: Duration) -> Option<Job>;

    async fn snapshot(&self) -> Vec<Job>;

    async fn is_empty(&self) -> bool;
}
