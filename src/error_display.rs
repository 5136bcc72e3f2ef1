//! User-facing error message formatting.
//!
//! Uses typed error matching (PairingError, PolarsError variants, io::ErrorKind)
//! rather than string parsing to produce short, actionable messages.

use polars::prelude::PolarsError;
use std::io;

use crate::error::PairingError;

/// Format a PolarsError as a user-facing message by matching on its variant.
pub fn user_message_from_polars(err: &PolarsError) -> String {
    use polars::prelude::PolarsError as PE;

    match err {
        PE::ColumnNotFound(msg) => format!("Column not found: {}", msg),
        PE::IO { error, .. } => user_message_from_io(error.as_ref()),
        PE::NoData(msg) => format!("No data: {}", msg),
        PE::SchemaMismatch(msg) => format!("Schema mismatch: {}", msg),
        PE::ComputeError(msg) => format!("Could not read the data: {}", msg),
        PE::Context { error, msg } => format!("{}: {}", msg, user_message_from_polars(error)),
        #[allow(unreachable_patterns)]
        _ => err.to_string(),
    }
}

/// Format an io::Error as a user-facing message by matching on ErrorKind.
pub fn user_message_from_io(err: &io::Error) -> String {
    use std::io::ErrorKind;

    match err.kind() {
        ErrorKind::NotFound => "File or directory not found.".to_string(),
        ErrorKind::PermissionDenied => "Permission denied. Check read access.".to_string(),
        ErrorKind::InvalidData | ErrorKind::InvalidInput => {
            "Invalid or corrupted data.".to_string()
        }
        ErrorKind::UnexpectedEof => "Unexpected end of file.".to_string(),
        _ => err.to_string(),
    }
}

pub fn user_message_from_pairing(err: &PairingError) -> String {
    match err {
        PairingError::Polars(pe) => user_message_from_polars(pe),
        other => other.to_string(),
    }
}

/// Format a color_eyre Report by downcasting to known error types.
/// Walks the cause chain to find PairingError, PolarsError or io::Error.
pub fn user_message_from_report(report: &color_eyre::eyre::Report) -> String {
    for cause in report.chain() {
        if let Some(pe) = cause.downcast_ref::<PairingError>() {
            return user_message_from_pairing(pe);
        }
        if let Some(pe) = cause.downcast_ref::<PolarsError>() {
            return user_message_from_polars(pe);
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return user_message_from_io(io_err);
        }
    }

    // Fallback: use first line of display to avoid long tracebacks
    let display = report.to_string();
    display
        .lines()
        .next()
        .map(str::trim)
        .unwrap_or("An error occurred")
        .to_string()
}
