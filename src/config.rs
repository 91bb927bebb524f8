use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt::format, prelude::__tracing_subscriber_field_MakeExt, EnvFilter};

use crate::domain::printer::PrinterSettings;

#[derive(Debug, Parser)]
#[clap(about = "Single-worker print queue simulation")]
pub struct Config {
    /// Simulated time to print one page.
    #[clap(long, default_value = "1000", env)]
    pub page_delay_ms: u64,
    /// How long the printer waits for a job before re-checking its power flag.
    #[clap(long, default_value = "500", env)]
    pub poll_interval_ms: u64,
    #[clap(long, value_enum, default_value = "text", env)]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Config {
    pub fn printer_settings(&self) -> PrinterSettings {
        PrinterSettings {
            page_delay: Duration::from_millis(self.page_delay_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

/// Used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_DIRECTIVE: &str = "spooler=warn";

fn log_filter(directive: Option<String>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

/// Logs go to stderr, in the same format the printer uses for its events.
pub fn configure_tracing(output: OutputFormat) {
    let filter = log_filter(std::env::var("RUST_LOG").ok());

    match output {
        OutputFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        OutputFormat::Text => {
            let fields =
                format::debug_fn(|writer, field, value| write!(writer, "{}={:?}", field, value))
                    .delimited(" ");

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .fmt_fields(fields)
                .init()
        }
    }
}
