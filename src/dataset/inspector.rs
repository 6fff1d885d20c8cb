//! Single-file CSV introspection.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::SystemTime;

use csv::{Reader, ReaderBuilder, StringRecord};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{debug, instrument};

use super::types::DatasetMetadata;
use crate::error::InspectError;

/// UTC timestamp with microseconds and an explicit `+00:00` offset.
const MODIFIED_TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6][offset_hour sign:mandatory]:[offset_minute]"
);

/// Same as [`MODIFIED_TIME_FORMAT`] for times on a whole second.
const MODIFIED_TIME_FORMAT_WHOLE_SECONDS: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
);

/// Inspect one CSV file and return its metadata.
///
/// Every physical line outside a quoted field is a row, blank lines
/// included. The first row is the header; every following row counts once,
/// regardless of width. A blank first line is an empty header. A zero-byte
/// file yields no columns and zero rows.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn inspect(path: &Path) -> Result<DatasetMetadata, InspectError> {
    let meta = std::fs::metadata(path).map_err(|source| InspectError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    let modified = meta.modified().map_err(|source| InspectError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    let modified_time = format_modified_time(modified).map_err(|source| InspectError::Timestamp {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = open_reader(path)?;
    let mut record = StringRecord::new();

    let mut header = Vec::new();
    let mut records = 0u64;
    let mut embedded_line_feeds = 0u64;
    while next_record(&mut reader, &mut record, path)? {
        if records == 0 {
            header = trimmed_fields(&record);
        }
        records += 1;
        embedded_line_feeds += record.as_slice().matches('\n').count() as u64;
    }

    let tally = reader.get_ref();
    let row_count = tally.rows(records, embedded_line_feeds).saturating_sub(1);
    let columns = if tally.starts_with_blank_line() {
        Vec::new()
    } else {
        header
    };

    debug!(row_count, columns = columns.len(), "Inspected dataset");

    Ok(DatasetMetadata {
        id: file_stem(path),
        filename: file_name(path),
        row_count,
        columns,
        size_bytes: meta.len(),
        modified_time,
    })
}

/// Read only the header row.
///
/// Returns `None` when the file holds no rows. A blank first line is an
/// empty header, not a missing one.
pub fn read_header(path: &Path) -> Result<Option<Vec<String>>, InspectError> {
    let mut reader = open_reader(path)?;
    let mut record = StringRecord::new();

    let found = next_record(&mut reader, &mut record, path)?;
    if reader.get_ref().starts_with_blank_line() {
        return Ok(Some(Vec::new()));
    }

    Ok(found.then(|| trimmed_fields(&record)))
}

/// Render a modification time as UTC ISO-8601.
///
/// The fraction is left out when the time falls on a whole second.
pub fn format_modified_time(modified: SystemTime) -> Result<String, time::error::Format> {
    let modified = OffsetDateTime::from(modified);
    if modified.microsecond() == 0 {
        modified.format(MODIFIED_TIME_FORMAT_WHOLE_SECONDS)
    } else {
        modified.format(MODIFIED_TIME_FORMAT)
    }
}

/// File name with its extension, lossily decoded.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn trimmed_fields(record: &StringRecord) -> Vec<String> {
    record.iter().map(|field| field.trim().to_string()).collect()
}

/// Byte source that tallies line feeds as the CSV reader pulls from it.
///
/// The `csv` reader skips empty lines, so blank rows are recovered from the
/// line feeds it consumed but did not attribute to a record.
struct LineTally<R> {
    inner: R,
    line_feeds: u64,
    first: Option<u8>,
    last: Option<u8>,
}

impl<R> LineTally<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            line_feeds: 0,
            first: None,
            last: None,
        }
    }

    fn starts_with_blank_line(&self) -> bool {
        matches!(self.first, Some(b'\n' | b'\r'))
    }

    /// Total rows, blank lines included, once the reader hit end of input.
    ///
    /// `records` is what the reader yielded and `embedded_line_feeds` the line
    /// feeds inside their quoted fields.
    fn rows(&self, records: u64, embedded_line_feeds: u64) -> u64 {
        let terminated = if self.last == Some(b'\n') {
            records
        } else {
            records.saturating_sub(1)
        };
        let blank = self
            .line_feeds
            .saturating_sub(embedded_line_feeds)
            .saturating_sub(terminated);
        records + blank
    }
}

impl<R: Read> Read for LineTally<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        let chunk = &buf[..n];
        if self.first.is_none() {
            self.first = chunk.first().copied();
        }
        if let Some(&byte) = chunk.last() {
            self.last = Some(byte);
        }
        self.line_feeds += chunk.iter().filter(|&&b| b == b'\n').count() as u64;
        Ok(n)
    }
}

fn open_reader(path: &Path) -> Result<Reader<LineTally<File>>, InspectError> {
    let file = File::open(path).map_err(|source| InspectError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(LineTally::new(file)))
}

fn next_record(
    reader: &mut Reader<LineTally<File>>,
    record: &mut StringRecord,
    path: &Path,
) -> Result<bool, InspectError> {
    reader.read_record(record).map_err(|source| InspectError::Read {
        path: path.to_path_buf(),
        source,
    })
}
