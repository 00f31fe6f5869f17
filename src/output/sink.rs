use super::OutputRow;
use crate::errors::AuditError;
use std::fs::File;
use std::io;
use std::path::Path;

/// Destination for audit rows.
pub trait RowSink {
    /// Appends one row.
    fn write_row(&mut self, row: &OutputRow) -> Result<(), csv::Error>;

    /// Pushes buffered rows to the underlying destination.
    fn flush(&mut self) -> Result<(), csv::Error> {
        Ok(())
    }
}

/// Collects rows in memory.
impl RowSink for Vec<OutputRow> {
    fn write_row(&mut self, row: &OutputRow) -> Result<(), csv::Error> {
        self.push(row.clone());
        Ok(())
    }
}

/// Headerless CSV sink with CRLF record terminators.
pub struct CsvSink<W: io::Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl CsvSink<File> {
    /// Creates or truncates the file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref();
        let writer = Self::builder()
            .from_path(path)
            .map_err(|source| AuditError::OpenOutput {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }
}

impl<W: io::Write> CsvSink<W> {
    /// Wraps an arbitrary writer.
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: Self::builder().from_writer(writer),
            rows_written: 0,
        }
    }

    fn builder() -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        // Secret and variable rows differ in length.
        builder
            .has_headers(false)
            .flexible(true)
            .terminator(csv::Terminator::CRLF);
        builder
    }

    /// Number of rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, csv::Error> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

impl<W: io::Write> RowSink for CsvSink<W> {
    fn write_row(&mut self, row: &OutputRow) -> Result<(), csv::Error> {
        self.writer.write_record(row.fields())?;
        self.rows_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), csv::Error> {
        self.writer.flush()?;
        Ok(())
    }
}
