//! Reads and writes record lists: comma-delimited, no header, filename then category.

use crate::models::Record;
use chrono::NaiveDateTime;
use regex::Regex;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("record file not found: {0}")]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub fn read_records(path: &Path) -> Result<Vec<Record>, RecordsError> {
    if !path.is_file() {
        return Err(RecordsError::NotFound(path.to_path_buf()));
    }
    parse_records(File::open(path)?)
}

/// Parses one- or two-column rows. Extra columns are ignored, a missing
/// category is read as empty and rows without a filename are skipped.
pub fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>, RecordsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let filename = row.get(0).unwrap_or_default();
        if filename.trim().is_empty() {
            continue;
        }
        records.push(Record::new(filename, row.get(1).unwrap_or_default()));
    }
    Ok(records)
}

pub fn write_records(path: &Path, records: &[Record]) -> Result<(), RecordsError> {
    let file = File::create(path)?;
    emit_records(file, records)
}

/// Writes every record as two columns, quoting only where needed.
pub fn emit_records<W: Write>(writer: W, records: &[Record]) -> Result<(), RecordsError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for record in records {
        wtr.write_record([record.filename.as_str(), record.category.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn date_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"_20\d{6}_").expect("static pattern"))
}

/// Base name shared by a list and all of its backups: the `.csv` extension
/// and any `_20YYMMDD_...` timestamp suffix are removed.
pub fn root_name(file_name: &str) -> String {
    let stem = match file_name.find(".csv") {
        Some(pos) => &file_name[..pos],
        None => file_name,
    };
    match date_marker().find(stem) {
        Some(m) => stem[..m.start()].to_string(),
        None => stem.to_string(),
    }
}

pub fn backup_file_name(root: &str, at: &NaiveDateTime) -> String {
    format!("{}_{}.csv", root, at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn root_name_strips_extension_and_timestamp() {
        assert_eq!(root_name("survey.csv"), "survey");
        assert_eq!(root_name("survey_20240518_101500.csv"), "survey");
        assert_eq!(root_name("night_run_20231201_000000.csv"), "night_run");
        assert_eq!(root_name("plain"), "plain");
        assert_eq!(root_name("run_1999_x.csv"), "run_1999_x");
    }

    #[test]
    fn backup_name_uses_compact_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 18)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        assert_eq!(backup_file_name("survey", &at), "survey_20240518_090503.csv");
    }
}
