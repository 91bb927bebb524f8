use std::{collections::VecDeque, sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, Notify},
    time::Instant,
};

use crate::domain::{entity::Job, repository::JobQueue};

#[derive(Clone, Debug, Default)]
pub struct MemoryJobQueue {
    jobs: Arc<Mutex<VecDeque<Job>>>,
    available: Arc<Notify>,
}

impl MemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl JobQueue for MemoryJobQueue {
    async fn enqueue(&self, job: Job) {
        self.jobs.lock().await.push_back(job);
        self.available.notify_one();
    }

    async fn dequeue(&self, timeout: Duration) -> Option<Job> {
        let deadline = Instant::now() + timeout;

        loop {
            // Register for a wakeup before looking, so an enqueue between the
            // check and the wait is not missed.
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(job) = self.jobs.lock().await.pop_front() {
                return Some(job);
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return None;
            }
        }
    }

    async fn snapshot(&self) -> Vec<Job> {
        self.jobs.lock().await.iter().cloned().collect()
    }

    async fn is_empty(&self) -> bool {
        self.jobs.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dequeue_is_fifo() {
        let queue = MemoryJobQueue::new();
        queue.enqueue(Job::new("a", 1)).await;
        queue.enqueue(Job::new("b", 2)).await;

        let timeout = Duration::from_millis(1);
        assert_eq!(queue.dequeue(timeout).await, Some(Job::new("a", 1)));
        assert_eq!(queue.dequeue(timeout).await, Some(Job::new("b", 2)));
        assert!(queue.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn dequeue_times_out_when_empty() {
        let queue = MemoryJobQueue::new();
        let start = Instant::now();

        assert_eq!(queue.dequeue(Duration::from_millis(500)).await, None);
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn dequeue_wakes_on_enqueue() {
        let queue = MemoryJobQueue::new();
        let consumer = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.dequeue(Duration::from_secs(60)).await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        let start = Instant::now();
        queue.enqueue(Job::new("late", 4)).await;

        assert_eq!(consumer.await.unwrap(), Some(Job::new("late", 4)));
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn snapshot_leaves_queue_intact() {
        let queue = MemoryJobQueue::new();
        queue.enqueue(Job::new("report", 3)).await;
        queue.enqueue(Job::new("invoice", 1)).await;

        let expected = vec![Job::new("report", 3), Job::new("invoice", 1)];
        assert_eq!(queue.snapshot().await, expected);
        assert_eq!(queue.snapshot().await, expected);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_snapshots_never_duplicate_or_drop() {
        let queue = MemoryJobQueue::new();
        let total = 500;

        let producer = {
            let queue = queue.clone();
            tokio::spawn(async move {
                for i in 0..total {
                    queue.enqueue(Job::new(format!("job-{}", i), 1)).await;
                }
            })
        };

        let consumer = {
            let queue = queue.clone();
            tokio::spawn(async move {
                let mut taken = Vec::new();
                while taken.len() < total {
                    if let Some(job) = queue.dequeue(Duration::from_millis(50)).await {
                        taken.push(job);
                    }
                }
                taken
            })
        };

        // Every snapshot must be a contiguous, ordered run of the submitted jobs.
        while !consumer.is_finished() {
            let snapshot = queue.snapshot().await;
            let indices: Vec<usize> = snapshot
                .iter()
                .map(|job| job.name["job-".len()..].parse().unwrap())
                .collect();
            for pair in indices.windows(2) {
                assert_eq!(pair[0] + 1, pair[1]);
            }
            tokio::task::yield_now().await;
        }

        producer.await.unwrap();
        let taken = consumer.await.unwrap();
        for (i, job) in taken.iter().enumerate() {
            assert_eq!(job.name, format!("job-{}", i));
        }
    }
}
