use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::Mutex,
};

use crate::{
    config::OutputFormat,
    domain::event::{Event, EventTransport},
};

/// One output stream shared by the operator console and the printer, so each
/// write lands whole.
#[derive(Debug)]
pub struct SharedWriter<W> {
    inner: Arc<Mutex<W>>,
}

impl<W> Clone for SharedWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<W> SharedWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    pub async fn write(&self, text: &str) -> Result<()> {
        let mut writer = self.inner.lock().await;
        writer.write_all(text.as_bytes()).await?;
        writer.flush().await?;

        Ok(())
    }

    pub async fn write_line(&self, line: &str) -> Result<()> {
        self.write(&format!("{}\n", line)).await
    }
}

#[cfg(test)]
impl SharedWriter<Vec<u8>> {
    pub async fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().await).into_owned()
    }
}

/// Writes printer events to the shared output, one line each.
#[derive(Debug)]
pub struct ConsoleEventTransport<W> {
    format: OutputFormat,
    output: SharedWriter<W>,
}

impl<W> Clone for ConsoleEventTransport<W> {
    fn clone(&self) -> Self {
        Self {
            format: self.format,
            output: self.output.clone(),
        }
    }
}

impl<W> ConsoleEventTransport<W> {
    pub fn new(format: OutputFormat, output: SharedWriter<W>) -> Self {
        Self { format, output }
    }

    pub fn render(&self, event: &Event) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(format!("[printer] {}", event.payload)),
            OutputFormat::Json => {
                serde_json::to_string(event).context("ConsoleEventTransport::render")
            }
        }
    }
}

#[async_trait::async_trait]
impl<W> EventTransport for ConsoleEventTransport<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn publish(&self, event: &Event) -> Result<()> {
        let line = self.render(event)?;

        self.output
            .write_line(&line)
            .await
            .context("ConsoleEventTransport::publish")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{entity::Job, event::Payload};

    fn transport(format: OutputFormat) -> ConsoleEventTransport<Vec<u8>> {
        ConsoleEventTransport::new(format, SharedWriter::new(Vec::new()))
    }

    #[test]
    fn text_lines_are_prefixed() {
        let event = Event::new(Payload::PrintFinished {
            job: Job::new("report", 3),
        });

        assert_eq!(
            transport(OutputFormat::Text).render(&event).unwrap(),
            "[printer] finished: report (3 pag.)."
        );
    }

    #[test]
    fn json_lines_carry_header_and_payload() {
        let line = transport(OutputFormat::Json)
            .render(&Event::new(Payload::PoweredOff))
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["payload"]["type"], "powered_off");
        assert!(value["header"]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn events_and_operator_text_share_one_stream() {
        let output = SharedWriter::new(Vec::new());
        let transport = ConsoleEventTransport::new(OutputFormat::Text, output.clone());

        output.write("> ").await.unwrap();
        transport
            .publish(&Event::new(Payload::Waiting))
            .await
            .unwrap();
        output.write_line("queued: memo (1 pag.)").await.unwrap();

        assert_eq!(
            output.contents().await,
            "> [printer] waiting, no documents.\nqueued: memo (1 pag.)\n"
        );
    }
}
