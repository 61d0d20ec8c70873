pub mod client;
pub mod csv_utils;
pub mod errors;
pub mod export;
pub mod models;
pub mod names;
pub mod sheet_url;

pub use client::{
    parse_extra_headers, ClientOptions, WhoOwesWhoClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
pub use csv_utils::{
    format_amount, format_time, header_record, item_record, write_expenses, write_expenses_file,
    FIXED_COLUMNS,
};
pub use errors::{ExpenseError, ExportError};
pub use export::{
    export_expenses, export_expenses_blocking, ExportOptions, ExportResult, DEFAULT_OUTPUT,
};
pub use models::{ExpenseItem, ParticipantId, SheetRef, Split};
pub use names::{parse_name_overrides, NameRegistry};
pub use sheet_url::parse_book_and_sheet;
