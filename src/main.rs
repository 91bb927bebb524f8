use anyhow::Result;
use api::{console::Console, service::PrintServiceImpl, PrintService};
use clap::Parser;
use infrastructure::{
    console::{ConsoleEventTransport, SharedWriter},
    memory::MemoryJobQueue,
};
use tokio::io::BufReader;
use tracing::{info, warn};

mod api;
mod config;
mod domain;
mod infrastructure;

fn main() -> Result<()> {
    let config = config::Config::parse();

    config::configure_tracing(config.output);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(config));

    // An unfinished stdin read would otherwise keep the runtime alive.
    runtime.shutdown_background();

    result
}

async fn run(config: config::Config) -> Result<()> {
    let queue = MemoryJobQueue::new();
    let output = SharedWriter::new(tokio::io::stdout());
    let event = ConsoleEventTransport::new(config.output, output.clone());

    let service = PrintServiceImpl::start(queue, event, config.printer_settings());
    let console = Console::new(&service);

    tokio::select! {
        res = console.run(BufReader::new(tokio::io::stdin()), &output) => {
            res?;
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupt received");
            service.interrupt();
            service.shutdown().await?;
        }
    }

    info!("Exiting");

    Ok(())
}
