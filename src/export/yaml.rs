//! YAML dumps of fetched reports, for reading in a terminal or diffing

use std::io::Write;

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};

pub fn write_yaml<W: Write, T: Serialize + ?Sized>(value: &T, writer: &mut W) -> LedgerResult<()> {
    serde_yaml::to_writer(writer, value).map_err(|e| LedgerError::Export(e.to_string()))
}
