//! Output rows and the sinks they are written to.

mod rows;
mod sink;

pub use rows::{read_rows, OutputRow, RowParseError, SECRET_TAG, VARIABLE_TAG};
pub use sink::{CsvSink, RowSink};
