use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{info, warn};

use super::{PrintService, ServiceResponse, SubmitError, SubmitRequest};
use crate::domain::{
    entity::Job,
    event::EventTransport,
    power::{power_channel, PowerSwitch},
    printer::{Printer, PrinterSettings},
    repository::JobQueue,
};

#[derive(Clone)]
pub struct PrintServiceImpl<Q>
where
    Q: JobQueue,
{
    queue: Q,
    switch: Arc<PowerSwitch>,
    worker: Arc<Mutex<Option<JoinHandle<Result<()>>>>>,
}

impl<Q> PrintServiceImpl<Q>
where
    Q: JobQueue,
{
    /// Spawns the printer on the current runtime.
    pub fn start<E>(queue: Q, event: E, settings: PrinterSettings) -> Self
    where
        E: EventTransport,
    {
        let (switch, power) = power_channel();
        let printer = Printer::new(queue.clone(), event, settings);
        let worker = tokio::spawn(printer.run(power));

        Self {
            queue,
            switch: Arc::new(switch),
            worker: Arc::new(Mutex::new(Some(worker))),
        }
    }
}

fn validate(req: SubmitRequest) -> std::result::Result<Job, SubmitError> {
    if req.name.trim().is_empty() {
        return Err(SubmitError::EmptyName);
    }

    if req.pages <= 0 {
        return Err(SubmitError::NonPositivePages(req.pages));
    }

    let pages = u32::try_from(req.pages).map_err(|_| SubmitError::TooManyPages(req.pages))?;

    Ok(Job::new(req.name, pages))
}

#[async_trait::async_trait]
impl<Q> PrintService for PrintServiceImpl<Q>
where
    Q: JobQueue,
{
    async fn submit(&self, req: SubmitRequest) -> Result<ServiceResponse<Job, SubmitError>> {
        info!("Submit request: {:?}", req);

        let job = match validate(req) {
            Ok(job) => job,
            Err(e) => {
                warn!(error = %e, "Submit rejected");
                return Ok(ServiceResponse::Err(e));
            }
        };

        self.queue.enqueue(job.clone()).await;

        Ok(ServiceResponse::Ok(job))
    }

    async fn status(&self) -> Result<Vec<Job>> {
        let jobs = self.queue.snapshot().await;

        info!(queued = jobs.len(), "Status response");

        Ok(jobs)
    }

    async fn shutdown(&self) -> Result<()> {
        if self.switch.power_off() {
            info!("Power off requested");
        }

        // The handle stays in the slot until it resolves, so a caller that
        // gives up waiting leaves the worker joinable for the next one.
        let mut worker = self.worker.lock().await;
        let handle = match worker.as_mut() {
            Some(handle) => handle,
            None => return Ok(()),
        };

        let joined = handle.await.context("PrintService::shutdown");
        worker.take();
        joined??;

        info!("Printer terminated");

        Ok(())
    }

    fn interrupt(&self) {
        if self.switch.interrupt() {
            warn!("Printer interrupted");
        }
    }
}
