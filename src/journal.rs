use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::SymptomSnapshot;

/// One day of self-reported metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub snapshot: SymptomSnapshot,
}

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("failed to open journal {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("journal row {row} is invalid: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("journal {0} has no entries")]
    Empty(PathBuf),
}

#[derive(Deserialize)]
struct CsvRow {
    date: NaiveDate,
    acne_days: i32,
    sleep_quality: i32,
    exercise_minutes: i32,
    weight: f64,
    mood: f64,
}

/// Reads a dated symptom log, oldest entry first.
pub fn load_csv(path: &Path) -> Result<Vec<JournalEntry>, JournalError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| JournalError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let entries = read_entries(reader)?;

    if entries.is_empty() {
        return Err(JournalError::Empty(path.to_path_buf()));
    }
    Ok(entries)
}

fn read_entries<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<JournalEntry>, JournalError> {
    let mut entries = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.map_err(|source| JournalError::Row {
            row: index + 1,
            source,
        })?;
        entries.push(JournalEntry {
            date: row.date,
            snapshot: SymptomSnapshot {
                acne_days: row.acne_days,
                sleep_quality: row.sleep_quality,
                exercise_minutes: row.exercise_minutes,
                weight: row.weight,
                mood: row.mood,
            },
        });
    }

    entries.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(entries)
}

/// The most recent entry of a journal.
pub fn load_latest(path: &Path) -> Result<JournalEntry, JournalError> {
    load_csv(path)?
        .pop()
        .ok_or_else(|| JournalError::Empty(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "date,acne_days,sleep_quality,exercise_minutes,weight,mood\n\
        2026-10-14, 3, 6, 20, 66.2, 5\n\
        2026-10-12, 4, 5, 0, 66.5, 4.5\n\
        2026-10-16, 1, 8, 45, 65.8, 7\n";

    fn write_journal(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write journal");
        file
    }

    #[test]
    fn loads_entries_sorted_by_date() {
        let file = write_journal(SAMPLE);
        let entries = load_csv(file.path()).expect("journal loads");

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2026, 10, 12).expect("date"));
        assert_eq!(entries[0].snapshot.mood, 4.5);

    }

    #[test]
    fn latest_entry_is_the_newest_date() {
        let file = write_journal(SAMPLE);
        let newest = load_latest(file.path()).expect("latest entry");
        assert_eq!(newest.date, NaiveDate::from_ymd_opt(2026, 10, 16).expect("date"));
        assert_eq!(newest.snapshot.exercise_minutes, 45);

        let empty = write_journal("date,acne_days,sleep_quality,exercise_minutes,weight,mood\n");
        assert!(matches!(load_latest(empty.path()), Err(JournalError::Empty(_))));
    }

    #[test]
    fn reports_the_bad_row() {
        let file = write_journal(
            "date,acne_days,sleep_quality,exercise_minutes,weight,mood\n\
             2026-10-14,3,6,20,66.2,5\n\
             2026-10-15,three,6,20,66.2,5\n",
        );
        let err = load_csv(file.path()).expect_err("row 2 is invalid");
        assert!(matches!(err, JournalError::Row { row: 2, .. }));
    }

    #[test]
    fn header_only_journal_is_empty() {
        let file = write_journal("date,acne_days,sleep_quality,exercise_minutes,weight,mood\n");
        assert!(matches!(load_csv(file.path()), Err(JournalError::Empty(_))));
    }

    #[test]
    fn missing_file_fails_to_open() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_csv(&dir.path().join("missing.csv")).expect_err("no file");
        assert!(matches!(err, JournalError::Open { .. }));
    }
}
