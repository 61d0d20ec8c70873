use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::ExpenseError;
use crate::models::ExpenseItem;
use crate::names::NameRegistry;

pub const FIXED_COLUMNS: [&str; 4] = ["Time", "Amount", "Description", "Payer"];

pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

pub fn format_time(time: &DateTime<FixedOffset>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn header_record(registry: &NameRegistry) -> Vec<String> {
    FIXED_COLUMNS
        .iter()
        .map(|column| column.to_string())
        .chain(
            registry
                .ids()
                .iter()
                .map(|id| format!("Split {}", registry.name(*id))),
        )
        .collect()
}

/// One CSV row: the fixed prefix, then one split cell per registry column.
pub fn item_record(item: &ExpenseItem, registry: &NameRegistry) -> Vec<String> {
    let mut record = Vec::with_capacity(FIXED_COLUMNS.len() + registry.len());
    record.push(format_time(&item.timestamp));
    record.push(format_amount(item.amount));
    record.push(item.description.trim().to_string());
    record.push(registry.name(item.payer_id));
    record.extend(
        registry
            .ids()
            .iter()
            .map(|id| item.split_for(*id).map(format_amount).unwrap_or_default()),
    );
    record
}

/// Writes the header (unless skipped) and one row per item, in item order.
pub fn write_expenses<W: Write>(
    writer: W,
    items: &[ExpenseItem],
    registry: &NameRegistry,
    include_header: bool,
) -> Result<usize, ExpenseError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if include_header {
        csv_writer.write_record(header_record(registry))?;
    }
    for item in items {
        csv_writer.write_record(item_record(item, registry))?;
    }
    csv_writer.flush()?;
    Ok(items.len())
}

/// Creates (or truncates) `path` and writes the export into it.
pub fn write_expenses_file(
    path: &Path,
    items: &[ExpenseItem],
    registry: &NameRegistry,
    include_header: bool,
) -> Result<usize, ExpenseError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let written = write_expenses(&mut writer, items, registry, include_header)?;
    writer.flush()?;
    Ok(written)
}
