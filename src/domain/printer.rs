use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use super::{
    entity::Job,
    event::{Event, EventTransport, Payload},
    power::PowerState,
    repository::JobQueue,
};

#[derive(Debug, Clone, Copy)]
pub struct PrinterSettings {
    pub page_delay: Duration,
    pub poll_interval: Duration,
}

enum Outcome {
    Finished,
    Interrupted,
}

/// The single worker draining the queue.
pub struct Printer<Q, E>
where
    Q: JobQueue,
    E: EventTransport,
{
    queue: Q,
    event: E,
    settings: PrinterSettings,
}

impl<Q, E> Printer<Q, E>
where
    Q: JobQueue,
    E: EventTransport,
{
    pub fn new(queue: Q, event: E, settings: PrinterSettings) -> Self {
        Self {
            queue,
            event,
            settings,
        }
    }

    pub async fn run(self, mut power: PowerState) -> Result<()> {
        info!(
            page_delay = ?self.settings.page_delay,
            poll_interval = ?self.settings.poll_interval,
            "Printer started"
        );

        // Only the first empty poll after a job gets a notice.
        let mut waiting_announced = false;

        loop {
            if power.is_interrupted() {
                self.publish(Payload::Interrupted).await?;
                break;
            }

            let next = tokio::select! {
                biased;
                _ = power.interrupted() => continue,
                job = self.queue.dequeue(self.settings.poll_interval) => job,
            };

            match next {
                Some(job) => {
                    waiting_announced = false;
                    if let Outcome::Interrupted = self.print(job, &mut power).await? {
                        break;
                    }
                }
                None => {
                    // A concurrent enqueue may have landed after the poll gave up.
                    if !power.is_on() && self.queue.is_empty().await {
                        debug!("Backlog drained after power off");
                        break;
                    }

                    if !waiting_announced {
                        self.publish(Payload::Waiting).await?;
                        waiting_announced = true;
                    }
                }
            }
        }

        self.publish(Payload::PoweredOff).await?;
        info!("Printer stopped");

        Ok(())
    }

    async fn print(&self, job: Job, power: &mut PowerState) -> Result<Outcome> {
        info!(name = %job.name, pages = job.pages, "Printing job");

        self.publish(Payload::PrintStarted { job: job.clone() })
            .await?;

        for page in 1..=job.pages {
            self.publish(Payload::PagePrinted {
                name: job.name.clone(),
                page,
                total: job.pages,
            })
            .await?;

            tokio::select! {
                _ = tokio::time::sleep(self.settings.page_delay) => {}
                _ = power.interrupted() => {
                    info!(name = %job.name, page, "Print interrupted");
                    self.publish(Payload::Interrupted).await?;
                    return Ok(Outcome::Interrupted);
                }
            }
        }

        self.publish(Payload::PrintFinished { job }).await?;

        Ok(Outcome::Finished)
    }

    async fn publish(&self, payload: Payload) -> Result<()> {
        self.event.publish(&Event::new(payload)).await
    }
}
