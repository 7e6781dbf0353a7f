//! Input decoders: one strategy per [`InputFormat`].
//!
//! A decoder turns an already-opened byte stream into metrics. It never owns
//! or closes the stream and returns either every record or an error, never a
//! partial list.

use std::io::{self, Read};

use serde::Deserialize;
use sumetife_core::error::{DecodeError, RecordLocation};
use sumetife_core::models::{InputFormat, Metric};
use sumetife_core::time_utils::parse_rfc3339_utc;

/// Turns a raw input stream into [`Metric`]s.
pub trait MetricDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Result<Vec<Metric>, DecodeError>;
}

/// Select the decoder for `format`.
pub fn decoder_for(format: InputFormat) -> Box<dyn MetricDecoder> {
    match format {
        InputFormat::Csv => Box::new(CsvDecoder),
        InputFormat::Json => Box::new(JsonDecoder),
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

/// Number of columns in a data row: `timestamp,category,value`.
const CSV_FIELDS: usize = 3;

/// Decodes `timestamp,category,value` rows after a discarded header row.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvDecoder;

impl MetricDecoder for CsvDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Result<Vec<Metric>, DecodeError> {
        // `flexible` lets short/long rows through so they can be reported as
        // MalformedRow with their line number instead of a generic csv error.
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut metrics = Vec::new();
        let mut record = csv::StringRecord::new();

        while csv_reader
            .read_record(&mut record)
            .map_err(csv_error)?
        {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            metrics.push(parse_csv_record(&record, line)?);
        }

        Ok(metrics)
    }
}

/// Read failures from the underlying stream stay I/O errors; everything else
/// the csv reader rejects is malformed content.
fn csv_error(err: csv::Error) -> DecodeError {
    if !err.is_io_error() {
        return DecodeError::MalformedCsv(err);
    }
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DecodeError::Io(source),
        kind => DecodeError::Io(io::Error::other(format!("{:?}", kind))),
    }
}

fn parse_csv_record(record: &csv::StringRecord, line: u64) -> Result<Metric, DecodeError> {
    if record.len() != CSV_FIELDS {
        return Err(DecodeError::MalformedRow {
            line,
            expected: CSV_FIELDS,
            found: record.len(),
        });
    }

    let raw_value = &record[2];
    let value = raw_value
        .parse::<i64>()
        .map_err(|source| DecodeError::MalformedValue {
            line,
            raw: raw_value.to_string(),
            source,
        })?;

    let raw_timestamp = &record[0];
    let timestamp =
        parse_rfc3339_utc(raw_timestamp).map_err(|source| DecodeError::MalformedTimestamp {
            location: RecordLocation::Line(line),
            raw: raw_timestamp.to_string(),
            source,
        })?;

    Ok(Metric::new(&record[1], value, timestamp))
}

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Wire shape of one element of a JSON input file.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    level_name: String,
    value: i64,
    timestamp: String,
}

/// Decodes a top-level array of `{level_name, value, timestamp}` objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl MetricDecoder for JsonDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Result<Vec<Metric>, DecodeError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        // Decode the array first, then each element, so a bad element can be
        // reported by index.
        let elements: Vec<serde_json::Value> = serde_json::from_slice(&bytes)
            .map_err(|source| DecodeError::MalformedJson {
                index: None,
                source,
            })?;

        elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                let record: JsonRecord = serde_json::from_value(element).map_err(|source| {
                    DecodeError::MalformedJson {
                        index: Some(index),
                        source,
                    }
                })?;
                let timestamp = parse_rfc3339_utc(&record.timestamp).map_err(|source| {
                    DecodeError::MalformedTimestamp {
                        location: RecordLocation::Element(index),
                        raw: record.timestamp.clone(),
                        source,
                    }
                })?;
                Ok(Metric::new(record.level_name, record.value, timestamp))
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
