use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while turning a raw input file into metrics.
///
/// Line numbers are 1-based and count the header row; element indices are
/// 0-based positions in the top-level JSON array.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// A CSV row did not have the expected number of fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A value column could not be parsed as a base-10 integer.
    #[error("line {line}: invalid value {raw:?}: {source}")]
    MalformedValue {
        line: u64,
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A timestamp was not a valid RFC 3339 date-time with offset.
    #[error("{location}: invalid timestamp {raw:?}: {source}")]
    MalformedTimestamp {
        location: RecordLocation,
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The CSV stream itself was structurally broken (quoting, encoding).
    #[error("malformed CSV: {0}")]
    MalformedCsv(#[source] csv::Error),

    /// The JSON document did not have the expected shape.
    #[error("malformed JSON{}: {source}", element_suffix(.index))]
    MalformedJson {
        index: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    /// The underlying stream could not be read.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

fn element_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" at element {}", i)).unwrap_or_default()
}

/// Where a record sits inside its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLocation {
    /// 1-based line in a CSV file.
    Line(u64),
    /// 0-based index in a JSON array.
    Element(usize),
}

impl std::fmt::Display for RecordLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordLocation::Line(line) => write!(f, "line {}", line),
            RecordLocation::Element(index) => write!(f, "element {}", index),
        }
    }
}

/// Failures raised while serializing aggregate results.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// All errors produced by an aggregate run.
#[derive(Error, Debug)]
pub enum MetricError {
    /// A command-line value is missing or invalid.
    #[error("argument error: {0}")]
    Argument(String),

    /// The input directory does not exist or is not a directory.
    #[error("data path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// The input directory could not be listed.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file could not be opened.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file was opened but its content could not be decoded.
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// Aggregate results could not be serialized; nothing was written.
    #[error("failed to encode result for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },

    /// The encoded result could not be written to disk.
    #[error("failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Summing a category would exceed the 64-bit integer range.
    #[error("total for category {category:?} overflowed")]
    Overflow { category: String },
}

/// Convenience alias used throughout the sumetife crates.
pub type Result<T> = std::result::Result<T, MetricError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed_row() {
        let err = DecodeError::MalformedRow {
            line: 3,
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "line 3: expected 3 fields, found 2");
    }

    #[test]
    fn test_error_display_malformed_value() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = DecodeError::MalformedValue {
            line: 2,
            raw: "abc".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("line 2: invalid value \"abc\""));
    }

    #[test]
    fn test_error_display_malformed_timestamp_element() {
        let source = chrono::DateTime::parse_from_rfc3339("yesterday").unwrap_err();
        let err = DecodeError::MalformedTimestamp {
            location: RecordLocation::Element(4),
            raw: "yesterday".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("element 4: invalid timestamp"));
    }

    #[test]
    fn test_error_display_malformed_json_with_index() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DecodeError::MalformedJson {
            index: Some(1),
            source,
        };
        assert!(err.to_string().starts_with("malformed JSON at element 1: "));
    }

    #[test]
    fn test_error_display_malformed_json_without_index() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DecodeError::MalformedJson {
            index: None,
            source,
        };
        assert!(err.to_string().starts_with("malformed JSON: "));
    }

    #[test]
    fn test_error_display_file_open() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = MetricError::FileOpen {
            path: PathBuf::from("/data/01-jan.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("failed to open"));
        assert!(msg.contains("/data/01-jan.json"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_decode_error_keeps_path_and_source() {
        let err = MetricError::Decode {
            path: PathBuf::from("/data/bad.csv"),
            source: DecodeError::MalformedRow {
                line: 2,
                expected: 3,
                found: 2,
            },
        };
        assert_eq!(
            err.to_string(),
            "failed to decode /data/bad.csv: line 2: expected 3 fields, found 2"
        );
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "line 2: expected 3 fields, found 2");
    }

    #[test]
    fn test_error_display_argument() {
        let err = MetricError::Argument("'--endTime' must be after '--startTime'".to_string());
        assert_eq!(
            err.to_string(),
            "argument error: '--endTime' must be after '--startTime'"
        );
    }

    #[test]
    fn test_error_display_overflow() {
        let err = MetricError::Overflow {
            category: "level1".to_string(),
        };
        assert_eq!(err.to_string(), "total for category \"level1\" overflowed");
    }

    #[test]
    fn test_decode_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DecodeError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
