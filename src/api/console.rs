use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};
use tracing::{debug, info};

use super::{
    command::{self, Command, CommandError, USAGE},
    PrintService, ServiceResponse,
};
use crate::{domain::entity::display_list, infrastructure::console::SharedWriter};

/// Line-oriented operator loop driving a `PrintService`.
pub struct Console<'a, S: PrintService> {
    service: &'a S,
}

impl<'a, S: PrintService> Console<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Runs until `salir` or end of input. Both shut the printer down.
    pub async fn run<R, W>(&self, input: R, output: &SharedWriter<W>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send,
    {
        let mut lines = input.lines();

        output
            .write_line(&format!("printer simulation ({})", USAGE))
            .await?;

        loop {
            output.write("> ").await?;

            let line = match lines.next_line().await.context("Console::run")? {
                Some(line) => line,
                None => {
                    debug!("Input closed");
                    break;
                }
            };

            match command::parse(&line) {
                Ok(Command::Blank) => {}
                Ok(Command::Add(req)) => match self.service.submit(req).await? {
                    ServiceResponse::Ok(job) => {
                        output.write_line(&format!("queued: {}", job)).await?
                    }
                    ServiceResponse::Err(e) => output.write_line(&format!("error: {}", e)).await?,
                },
                Ok(Command::Status) => {
                    let jobs = self.service.status().await?;
                    output
                        .write_line(&format!("queue: {}", display_list(&jobs)))
                        .await?;
                }
                Ok(Command::Exit) => break,
                Err(e @ CommandError::InvalidPages(_)) => {
                    output.write_line(&format!("error: {}", e)).await?
                }
                Err(e @ CommandError::Unknown(_)) => {
                    output.write_line(&format!("{}. {}", e, USAGE)).await?
                }
            }
        }

        info!("Operator requested shutdown");
        output.write_line("shutting down printer...").await?;
        self.service.shutdown().await?;
        output.write_line("printer off, goodbye.").await?;

        Ok(())
    }
}
