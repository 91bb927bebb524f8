use std::fmt;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Job;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    Waiting,
    PrintStarted { job: Job },
    PagePrinted { name: String, page: u32, total: u32 },
    PrintFinished { job: Job },
    Interrupted,
    PoweredOff,
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Waiting => write!(f, "waiting, no documents."),
            Payload::PrintStarted { job } => write!(f, "beginning print: {}.", job),
            Payload::PagePrinted { name, page, total } => {
                write!(f, "{} -> page {} of {}.", name, page, total)
            }
            Payload::PrintFinished { job } => write!(f, "finished: {}.", job),
            Payload::Interrupted => write!(f, "interrupted."),
            Payload::PoweredOff => write!(f, "powered off."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub header: Header,
    pub payload: Payload,
}

impl Event {
    pub fn new(payload: Payload) -> Self {
        Self {
            header: Header {
                timestamp: Utc::now(),
            },
            payload,
        }
    }
}

#[async_trait::async_trait]
pub trait EventTransport: Clone + Send + Sync + 'static {
    async fn publish(&self, event: &Event) -> Result<()>;
}
