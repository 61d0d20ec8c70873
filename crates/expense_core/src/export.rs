use std::path::PathBuf;
use std::time::Duration;

use tokio::runtime::Builder;
use tracing::{debug, info};

use crate::client::{parse_extra_headers, ClientOptions, WhoOwesWhoClient, DEFAULT_BASE_URL};
use crate::csv_utils::write_expenses_file;
use crate::errors::{ExpenseError, ExportError};
use crate::models::{ParticipantId, SheetRef};
use crate::names::parse_name_overrides;
use crate::sheet_url::parse_book_and_sheet;

pub const DEFAULT_OUTPUT: &str = "expenses.csv";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub sheet_url: String,
    pub output_path: PathBuf,
    /// `id->name,...`
    pub names: String,
    /// `Name:Value,...`
    pub extra_headers: String,
    pub include_header: bool,
    pub timeout_secs: u64,
    pub base_url: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sheet_url: String::new(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            names: String::new(),
            extra_headers: String::new(),
            include_header: true,
            timeout_secs: 10,
            base_url: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportResult {
    pub output_path: PathBuf,
    pub sheet: SheetRef,
    pub row_count: usize,
    pub participants: Vec<(ParticipantId, String)>,
}

/// Fetches the sheet once and writes it to `options.output_path`.
///
/// Configuration is fully validated before the request goes out, and the
/// output file is only touched once all rows have been decoded.
pub async fn export_expenses(options: ExportOptions) -> Result<ExportResult, ExportError> {
    let mut registry = parse_name_overrides(&options.names)?;
    let sheet = parse_book_and_sheet(&options.sheet_url)?;
    let extra_headers = parse_extra_headers(&options.extra_headers)?;

    let client = WhoOwesWhoClient::new(ClientOptions {
        timeout: Duration::from_secs(options.timeout_secs),
        base_url: options
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        extra_headers,
    })?;

    let items = client
        .fetch_rows(&sheet)
        .await
        .map_err(|err| ExportError::from(err).context(format!("fetching {sheet}")))?;
    for item in &items {
        debug!(?item, "fetched row");
    }

    registry.discover(&items);

    let row_count = write_expenses_file(
        &options.output_path,
        &items,
        &registry,
        options.include_header,
    )
    .map_err(|err| {
        ExportError::from(err).context(format!("writing {}", options.output_path.display()))
    })?;

    info!(
        rows = row_count,
        output = %options.output_path.display(),
        "exported {row_count} rows to {}",
        options.output_path.display()
    );

    Ok(ExportResult {
        output_path: options.output_path,
        sheet,
        row_count,
        participants: registry.entries(),
    })
}

/// Runs [`export_expenses`] on a single-threaded runtime.
pub fn export_expenses_blocking(options: ExportOptions) -> Result<ExportResult, ExportError> {
    let rt = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| ExpenseError::Other(format!("failed to start tokio runtime: {err}")))?;
    rt.block_on(export_expenses(options))
}
