use std::io;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("could not extract book/sheet from url: \"{0}\" (provide via param \"url\")")]
    InvalidUrl(String),
    #[error("invalid participant id in names: {0}")]
    InvalidNames(String),
    #[error("invalid request header: {0}")]
    InvalidHeader(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("request failed with HTTP status {status}")]
    Http { status: StatusCode },
    #[error("response is not a valid expense list: {0}")]
    InvalidJson(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("expense export failed: {0}")]
    Core(#[from] ExpenseError),
    #[error("{0}")]
    Context(String),
}

impl ExportError {
    pub fn context<T: Into<String>>(self, message: T) -> Self {
        let message = message.into();
        match self {
            ExportError::Core(err) => ExportError::Context(format!("{message}: {err}")),
            ExportError::Context(existing) => {
                ExportError::Context(format!("{message}: {existing}"))
            }
        }
    }
}
