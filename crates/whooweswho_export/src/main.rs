use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use expense_core::{export_expenses_blocking, ExportOptions, ExportResult, DEFAULT_OUTPUT};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Export a whooweswho.net expense sheet to CSV", long_about = None)]
struct Cli {
    /// CSV output file
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// URL of the sheet, e.g. "https://www.whooweswho.net/session#/sheets/1234/6789/expenses"
    #[arg(short = 'u', long = "url")]
    url: String,

    /// Names to replace ids, e.g. "123456->Arnold,987654->Schwarz"
    #[arg(short = 'n', long = "names", default_value = "")]
    names: String,

    /// Additional request headers, e.g. "Cookie:session_cookie123,X-My-Header:42"
    #[arg(
        short = 'H',
        long = "headers",
        env = "WHOOWESWHO_HEADERS",
        default_value = "",
        hide_env_values = true
    )]
    headers: String,

    /// Skip header line in csv
    #[arg(long = "skip-header")]
    skip_header: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    #[arg(long = "base-url", hide = true)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ExportOptions {
        sheet_url: cli.url,
        output_path: cli.output,
        names: cli.names,
        extra_headers: cli.headers,
        include_header: !cli.skip_header,
        base_url: cli.base_url,
        ..ExportOptions::default()
    };

    let result = export_expenses_blocking(options).with_context(|| "failed to export expenses")?;
    print_summary(&result);
    Ok(())
}

const VERBOSE_FILTER: &str = "expense_core=debug,whooweswho_export=debug";

/// `-v` wins over `RUST_LOG` and only raises our own crates to debug.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.filter(|directives| !verbose && !directives.trim().is_empty()) {
        Some(directives) => directives.to_string(),
        None if verbose => VERBOSE_FILTER.to_string(),
        None => "info".to_string(),
    }
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(log_filter(verbose, rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_summary(result: &ExportResult) {
    println!(
        "{} {} rows from {} to {}",
        style("Exported").green().bold(),
        result.row_count,
        result.sheet,
        result.output_path.display()
    );
    if !result.participants.is_empty() {
        let columns: Vec<&str> = result
            .participants
            .iter()
            .map(|(_, name)| name.as_str())
            .collect();
        println!("{} {}", style("Split columns:").dim(), columns.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_limits_debug_to_own_crates() {
        assert_eq!(log_filter(true, None), VERBOSE_FILTER);
        assert_eq!(log_filter(true, Some("trace")), VERBOSE_FILTER);
    }

    #[test]
    fn rust_log_applies_without_verbose() {
        assert_eq!(log_filter(false, Some("hyper=trace")), "hyper=trace");
        assert_eq!(log_filter(false, Some("  ")), "info");
        assert_eq!(log_filter(false, None), "info");
    }
}
