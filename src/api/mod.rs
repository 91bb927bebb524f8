use anyhow::Result;
use thiserror::Error;

use crate::domain::entity::Job;

pub mod command;
pub mod console;
pub mod service;

/// Outcome of a request the operator can get wrong. Transport and runtime
/// failures stay in the outer `anyhow::Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResponse<T, E> {
    Ok(T),
    Err(E),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub name: String,
    pub pages: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("document name must not be empty")]
    EmptyName,
    #[error("page count must be greater than 0 (got {0})")]
    NonPositivePages(i64),
    #[error("page count {0} is too large")]
    TooManyPages(i64),
}

#[async_trait::async_trait]
pub trait PrintService: Send + Sync {
    async fn submit(&self, req: SubmitRequest) -> Result<ServiceResponse<Job, SubmitError>>;

    async fn status(&self) -> Result<Vec<Job>>;

    /// Powers the printer off and waits until it has drained the queue.
    async fn shutdown(&self) -> Result<()>;

    /// Stops the printer immediately, abandoning the page in progress.
    fn interrupt(&self);
}
