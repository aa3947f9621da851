//! Loading NEOs and close approaches from NASA data files.
//!
//! - NEOs come from a CSV file with a header row. Columns are found by name
//!   (`pdes`, `name`, `diameter`, `pha`); any others are ignored.
//! - Close approaches come from a JSON document whose `data` array holds one
//!   string tuple per approach. Fields are taken by position: designation (0),
//!   calendar time (3), distance in au (4) and relative velocity in km/s (7).
//!
//! Missing names, unknown diameters, unparseable times and non-numeric
//! distances or velocities degrade to sentinels. Rows that cannot form a
//! record at all are errors.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{CloseApproach, NearEarthObject};

const DESIGNATION_FIELD: usize = 0;
const TIME_FIELD: usize = 3;
const DISTANCE_FIELD: usize = 4;
const VELOCITY_FIELD: usize = 7;

/// Read every NEO from a CSV file.
///
/// # Errors
/// Returns an error if the file cannot be read, lacks a required column, or
/// has a row without a designation.
pub fn load_neos(path: impl AsRef<Path>) -> Result<Vec<NearEarthObject>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let neos = read_neos(BufReader::new(file))?;
    tracing::info!(path = %path.display(), count = neos.len(), "loaded NEOs");
    Ok(neos)
}

/// Read every close approach from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read, is not the expected JSON
/// shape, or has a row that is too short or lacks a designation.
pub fn load_approaches(path: impl AsRef<Path>) -> Result<Vec<CloseApproach>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let approaches = read_approaches(BufReader::new(file))?;
    tracing::info!(path = %path.display(), count = approaches.len(), "loaded close approaches");
    Ok(approaches)
}

struct NeoColumns {
    designation: usize,
    name: usize,
    diameter: usize,
    pha: usize,
}

impl NeoColumns {
    fn from_header(header_line: &str) -> Result<Self> {
        let header_line = header_line.trim_start_matches('\u{feff}');
        let fields = split_record(header_line);
        let col_map: HashMap<&str, usize> = fields
            .iter()
            .enumerate()
            .map(|(idx, col)| (col.trim(), idx))
            .collect();
        Ok(Self {
            designation: require_column(&col_map, "pdes")?,
            name: require_column(&col_map, "name")?,
            diameter: require_column(&col_map, "diameter")?,
            pha: require_column(&col_map, "pha")?,
        })
    }

    fn build(&self, fields: &[String], line: usize) -> Result<NearEarthObject> {
        let field = |idx: usize| fields.get(idx).map(String::as_str).unwrap_or("");
        let designation = field(self.designation).trim();
        if designation.is_empty() {
            return Err(Error::malformed(line, "missing primary designation"));
        }
        Ok(NearEarthObject::from_fields(
            designation,
            field(self.name),
            field(self.diameter),
            field(self.pha),
        ))
    }
}

fn require_column(col_map: &HashMap<&str, usize>, name: &str) -> Result<usize> {
    col_map
        .get(name)
        .copied()
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// Read NEOs from CSV text. See [`load_neos`].
pub fn read_neos<R: BufRead>(reader: R) -> Result<Vec<NearEarthObject>> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(Error::malformed(1, "expected a header row")),
    };
    let columns = NeoColumns::from_header(&header)?;

    let mut neos = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // Header is line 1.
        neos.push(columns.build(&split_record(&line), index + 2)?);
    }
    Ok(neos)
}

#[derive(Deserialize)]
struct CloseApproachData {
    data: Vec<Vec<Option<String>>>,
}

/// Read close approaches from JSON text. See [`load_approaches`].
pub fn read_approaches<R: Read>(reader: R) -> Result<Vec<CloseApproach>> {
    let document: CloseApproachData = serde_json::from_reader(reader)?;
    document
        .data
        .iter()
        .enumerate()
        .map(|(index, row)| parse_approach_row(row, index + 1))
        .collect()
}

fn parse_approach_row(row: &[Option<String>], record: usize) -> Result<CloseApproach> {
    if row.len() <= VELOCITY_FIELD {
        return Err(Error::malformed(
            record,
            format!("expected at least {} fields, got {}", VELOCITY_FIELD + 1, row.len()),
        ));
    }
    let text = |idx: usize| row[idx].as_deref().unwrap_or("").trim();

    let designation = text(DESIGNATION_FIELD);
    if designation.is_empty() {
        return Err(Error::malformed(record, "missing designation"));
    }
    let distance = parse_measure(text(DISTANCE_FIELD), "distance", designation, record);
    let velocity = parse_measure(text(VELOCITY_FIELD), "velocity", designation, record);

    Ok(CloseApproach::from_fields(
        designation,
        text(TIME_FIELD),
        distance,
        velocity,
    ))
}

/// Empty or non-numeric values become NaN.
fn parse_measure(s: &str, field: &str, designation: &str, record: usize) -> f64 {
    s.parse().unwrap_or_else(|_| {
        tracing::debug!(record, designation, field, value = s, "non-numeric approach field");
        f64::NAN
    })
}

/// Split one CSV line, honouring double-quoted fields and `""` escapes.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const NEOS_CSV: &str = "\
id,spkid,full_name,pdes,name,prefix,neo,pha,diameter,albedo
a0000433,2000433,\"   433 Eros (A898 PA)\",433,Eros,,Y,N,16.84,0.25
a0001036,2001036,\" 1036 Ganymed (A924 UB)\",1036,Ganymed,,Y,N,37.675,0.238
bK19A00B,3840340,\"       (2019 AB)\",2019 AB,,,Y,Y,,
";

    const CAD_JSON: &str = r#"{
  "signature": {"version": "1.1", "source": "NASA/JPL SBDB Close Approach Data API"},
  "count": "3",
  "fields": ["des", "orbit_id", "jd", "cd", "dist", "dist_min", "dist_max", "v_rel", "v_inf", "t_sigma_f", "h"],
  "data": [
    ["433", "659", "2415020.507669610", "1900-Jan-01 00:11", "0.0921795123769547", "0.0912006569517418", "0.0931589328621254", "16.7523040362574", "16.7505784933163", "00:01", "10.3"],
    ["2019 AB", "12", "2458849.500000000", "2020-Jan-01 12:00", "0.0450000000000000", "0.0449", "0.0451", "8.5", null, "< 00:01", "24.1"],
    ["1036", "900", "2459000.500000000", "bogus", "0.3", "0.29", "0.31", "12.0", "11.9", "00:02", "9.4"]
  ]
}"#;

    #[test]
    fn test_read_neos_by_header() {
        let neos = read_neos(Cursor::new(NEOS_CSV)).unwrap();
        assert_eq!(neos.len(), 3);

        assert_eq!(neos[0].designation(), "433");
        assert_eq!(neos[0].name(), Some("Eros"));
        assert_eq!(neos[0].diameter(), 16.84);
        assert!(!neos[0].hazardous());

        assert_eq!(neos[2].designation(), "2019 AB");
        assert_eq!(neos[2].name(), None);
        assert!(neos[2].diameter().is_nan());
        assert!(neos[2].hazardous());
    }

    #[test]
    fn test_read_neos_missing_column() {
        let err = read_neos(Cursor::new("pdes,name,diameter\n433,Eros,16.84\n")).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(ref col) if col == "pha"), "{}", err);
    }

    #[test]
    fn test_read_neos_empty_input() {
        let err = read_neos(Cursor::new("")).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }), "{}", err);
    }

    #[test]
    fn test_read_neos_missing_designation_reports_line() {
        let err = read_neos(Cursor::new("pdes,name,diameter,pha\n433,Eros,16.84,N\n,Nameless,,N\n"))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 3, .. }), "{}", err);
    }

    #[test]
    fn test_read_neos_skips_blank_lines_and_short_rows() {
        let neos = read_neos(Cursor::new("pdes,name,diameter,pha\n\n433\n")).unwrap();
        assert_eq!(neos.len(), 1);
        assert_eq!(neos[0].name(), None);
        assert!(neos[0].diameter().is_nan());
        assert!(!neos[0].hazardous());
    }

    #[test]
    fn test_read_approaches_by_position() {
        let approaches = read_approaches(Cursor::new(CAD_JSON)).unwrap();
        assert_eq!(approaches.len(), 3);

        assert_eq!(approaches[0].designation(), "433");
        assert_eq!(approaches[0].time_str().as_deref(), Some("1900-01-01 00:11"));
        assert_eq!(approaches[0].distance(), 0.0921795123769547);
        assert_eq!(approaches[0].velocity(), 16.7523040362574);

        assert_eq!(approaches[1].designation(), "2019 AB");
        assert_eq!(approaches[1].velocity(), 8.5);
    }

    #[test]
    fn test_read_approaches_bad_time_keeps_record() {
        let approaches = read_approaches(Cursor::new(CAD_JSON)).unwrap();
        assert_eq!(approaches[2].designation(), "1036");
        assert_eq!(approaches[2].time(), None);
        assert_eq!(approaches[2].distance(), 0.3);
    }

    #[test]
    fn test_read_approaches_short_row() {
        let err = read_approaches(Cursor::new(r#"{"data": [["433", "1", "2", "1900-Jan-01 00:11", "0.1"]]}"#))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }), "{}", err);
    }

    #[test]
    fn test_read_approaches_missing_measure_is_nan() {
        let json = r#"{"data": [
            ["433", "1", "2", "1900-Jan-01 00:11", "0.1", "", "", "16.7"],
            ["433", "1", "2", "1901-Jan-01 00:11", "", "", "", "far"],
            ["1036", "1", "2", "1902-Jan-01 00:11", "0.3", "", "", null]
        ]}"#;
        let approaches = read_approaches(Cursor::new(json)).unwrap();
        assert_eq!(approaches.len(), 3);

        assert!(approaches[1].distance().is_nan());
        assert!(approaches[1].velocity().is_nan());
        assert_eq!(approaches[1].time_str().as_deref(), Some("1901-01-01 00:11"));

        assert_eq!(approaches[2].designation(), "1036");
        assert_eq!(approaches[2].distance(), 0.3);
        assert!(approaches[2].velocity().is_nan());
    }

    #[test]
    fn test_read_approaches_not_json() {
        let err = read_approaches(Cursor::new("not json")).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_split_record_quotes() {
        assert_eq!(split_record("a,b,,c"), vec!["a", "b", "", "c"]);
        assert_eq!(split_record("\"x, y\",z"), vec!["x, y", "z"]);
        assert_eq!(split_record("\"say \"\"hi\"\"\",1"), vec!["say \"hi\"", "1"]);
    }

    #[test]
    fn test_load_from_files() {
        let mut neo_file = NamedTempFile::new().unwrap();
        neo_file.write_all(NEOS_CSV.as_bytes()).unwrap();
        neo_file.flush().unwrap();
        let mut cad_file = NamedTempFile::new().unwrap();
        cad_file.write_all(CAD_JSON.as_bytes()).unwrap();
        cad_file.flush().unwrap();

        assert_eq!(load_neos(neo_file.path()).unwrap().len(), 3);
        assert_eq!(load_approaches(cad_file.path()).unwrap().len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_neos("/nonexistent/neos.csv").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
