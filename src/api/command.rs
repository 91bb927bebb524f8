use thiserror::Error;

use super::SubmitRequest;

pub const USAGE: &str = "usage: agregar <name> <pages>, estado, salir";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(SubmitRequest),
    Status,
    Exit,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("page count must be an integer (got '{0}')")]
    InvalidPages(String),
    #[error("unrecognized command '{0}'")]
    Unknown(String),
}

/// Parses one operator line. Extra trailing tokens are ignored.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();

    let word = match parts.next() {
        Some(word) => word.to_lowercase(),
        None => return Ok(Command::Blank),
    };

    match word.as_str() {
        "agregar" | "add" => match (parts.next(), parts.next()) {
            (Some(name), Some(pages)) => {
                let pages = pages
                    .parse::<i64>()
                    .map_err(|_| CommandError::InvalidPages(pages.to_string()))?;

                Ok(Command::Add(SubmitRequest {
                    name: name.to_string(),
                    pages,
                }))
            }
            _ => Err(CommandError::Unknown(line.trim().to_string())),
        },
        "estado" | "status" => Ok(Command::Status),
        "salir" | "exit" => Ok(Command::Exit),
        _ => Err(CommandError::Unknown(line.trim().to_string())),
    }
}
