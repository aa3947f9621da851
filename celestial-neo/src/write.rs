//! Writing close-approach results to CSV or JSON.
//!
//! Both writers consume any stream of [`LinkedApproach`]es, typically a
//! limited [`crate::NeoDatabase::query`]. Every approach must be linked to a
//! NEO, since the output includes the NEO's fields.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{ApproachRecord, LinkedApproach};

/// Column order of the CSV output.
pub const CSV_FIELDNAMES: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// Write results to a CSV file, returning the number of rows written.
///
/// The file only appears at `path` once every row has been written.
///
/// # Errors
/// Returns an error if the file cannot be written or an approach is unlinked.
pub fn write_to_csv<'db, I>(results: I, path: impl AsRef<Path>) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'db>>,
{
    let path = path.as_ref();
    let rows = write_via_temp(path, |writer| write_csv(results, writer))?;
    tracing::info!(path = %path.display(), rows, "wrote CSV results");
    Ok(rows)
}

/// Write results to a JSON file, returning the number of records written.
///
/// The file only appears at `path` once every record has been written.
///
/// # Errors
/// Returns an error if the file cannot be written or an approach is unlinked.
pub fn write_to_json<'db, I>(results: I, path: impl AsRef<Path>) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'db>>,
{
    let path = path.as_ref();
    let records = write_via_temp(path, |writer| write_json(results, writer))?;
    tracing::info!(path = %path.display(), records, "wrote JSON results");
    Ok(records)
}

/// Write into `<path>.tmp`, then rename over `path`. On failure the temp
/// file is removed and `path` is left untouched.
fn write_via_temp<F>(path: &Path, write: F) -> Result<usize>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<usize>,
{
    let temp_path = temp_path_for(path);
    let written = File::create(&temp_path)
        .map_err(Error::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            let count = write(&mut writer)?;
            writer.flush()?;
            Ok(count)
        });

    match written {
        Ok(count) => {
            fs::rename(&temp_path, path)?;
            Ok(count)
        }
        Err(err) => {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                tracing::debug!(path = %temp_path.display(), error = %cleanup, "temp file not removed");
            }
            Err(err)
        }
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Stream results as CSV rows, header first.
///
/// A missing name is an empty cell and an unknown number is `nan`.
/// Whole numbers keep their decimal point (`1.0`).
pub fn write_csv<'db, I, W>(results: I, mut writer: W) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'db>>,
    W: Write,
{
    writeln!(writer, "{}", CSV_FIELDNAMES.join(","))?;

    let mut rows = 0;
    for approach in results {
        let neo = approach.linked_neo()?;
        let cells = [
            approach.time_str().unwrap_or_default(),
            format_number(approach.distance()),
            format_number(approach.velocity()),
            neo.designation().to_string(),
            neo.name().unwrap_or_default().to_string(),
            format_number(neo.diameter()),
            neo.hazardous().to_string(),
        ];
        let row: Vec<Cow<'_, str>> = cells.iter().map(|cell| escape_field(cell)).collect();
        writeln!(writer, "{}", row.join(","))?;
        rows += 1;
    }
    Ok(rows)
}

/// Write results as a JSON array of nested approach records.
///
/// JSON cannot represent NaN, so an unknown diameter is written as `null`.
pub fn write_json<'db, I, W>(results: I, writer: W) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'db>>,
    W: Write,
{
    let records = results
        .into_iter()
        .map(|approach| approach.serialize())
        .collect::<Result<Vec<ApproachRecord>>>()?;
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(records.len())
}

fn format_number(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:?}", value)
    }
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
