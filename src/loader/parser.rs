use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// Errors are automatically converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let data = fs::read_to_string(file_path).map_err(Error::IoError)?;

    let parsed_data: T = serde_json::from_str(&data).map_err(Error::DeserializationError)?;

    Ok(parsed_data)
}

/// Reads a delimited dataset file into records of type `T`.
///
/// The first line must be a header row. The delimiter is sniffed from that
/// line (tab-separated exports exist in the wild next to comma-separated
/// ones) and a UTF-8 byte order mark is stripped before parsing. Rows that
/// fail to deserialize are skipped and counted, never fatal.
///
/// Returns the parsed records together with the number of skipped rows.
pub fn read_delimited_records<T: DeserializeOwned>(file_path: &Path) -> Result<(Vec<T>, usize)> {
    let data = fs::read_to_string(file_path).map_err(Error::IoError)?;
    let data = data.strip_prefix('\u{feff}').unwrap_or(&data);

    let delimiter = match data.lines().next() {
        Some(header) if header.contains('\t') => b'\t',
        _ => b',',
    };

    let mut reader = csv::ReaderBuilder::new().delimiter(delimiter).trim(csv::Trim::All).from_reader(data.as_bytes());

    let mut records: Vec<T> = Vec::new();
    let mut skipped: usize = 0;

    for (row_index, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                log::warn!("MalformedInputRecord: {} row {} skipped: {}", file_path.display(), row_index + 1, e);
            }
        }
    }

    Ok((records, skipped))
}
