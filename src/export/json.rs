//! JSON dumps of fetched reports

use std::io::Write;

use serde::Serialize;

use super::export_err;
use crate::error::{LedgerError, LedgerResult};

/// Pretty-print any report as JSON, with a trailing newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(value: &T, writer: &mut W) -> LedgerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer).map_err(export_err)
}
