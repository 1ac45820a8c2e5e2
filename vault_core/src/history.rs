//! Append-only set log.
//!
//! Completed sets are appended to a CSV file with file locking to ensure
//! safe concurrent access. Lookups re-read the whole file; nothing is cached.

use crate::calc::estimated_one_rep_max;
use crate::{HistorySummary, Result, SetRecord};
use chrono::{Local, NaiveDate};
use csv::{ReaderBuilder, WriterBuilder};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Fixed file name of the log inside the data directory
pub const LOG_FILE_NAME: &str = "iron_vault_log.csv";

/// Header row written at the top of every log
pub const LOG_HEADER: [&str; 5] = ["Date", "Exercise", "Weight", "Reps", "1RM"];

/// Storage seam used by playlist generation and the session player
pub trait SetLog {
    /// Append a completed set stamped with today's date
    fn append(&mut self, exercise: &str, weight: &str, reps: &str) -> Result<SetRecord>;

    /// Summary of the newest set logged under exactly this name
    fn most_recent(&self, exercise: &str) -> Result<HistorySummary>;
}

/// CSV-backed set log
#[derive(Clone, Debug)]
pub struct CsvSetLog {
    path: PathBuf,
}

impl CsvSetLog {
    /// Open the log in `dir`, creating the directory and header if absent
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let log = Self {
            path: dir.join(LOG_FILE_NAME),
        };

        let file = log.open_for_append()?;
        file.lock_exclusive()?;
        let result = log.write_header_if_empty(&file);
        file.unlock()?;
        result?;

        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a completed set with an explicit date
    pub fn append_on(
        &mut self,
        date: NaiveDate,
        exercise: &str,
        weight: &str,
        reps: &str,
    ) -> Result<SetRecord> {
        let weight = weight.trim();
        let reps = reps.trim();
        let record = SetRecord {
            date,
            exercise: exercise.to_string(),
            weight: weight.to_string(),
            reps: reps.to_string(),
            one_rep_max: estimated_one_rep_max(weight, reps),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = self.open_for_append()?;

        // Acquire exclusive lock
        file.lock_exclusive()?;
        let result = self.write_record(&file, &record);
        file.unlock()?;
        result?;

        tracing::debug!(
            "Logged {} {}kg x {} (1RM {})",
            record.exercise,
            record.weight,
            record.reps,
            record.one_rep_max
        );
        Ok(record)
    }

    /// Read every record in append order
    ///
    /// A missing log reads as empty. Rows that fail to parse are skipped.
    pub fn records(&self) -> Result<Vec<SetRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        // Acquire shared lock for reading
        file.lock_shared()?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(&file);

        let mut records = Vec::new();
        for (row_num, result) in reader.deserialize::<SetRecord>().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    // Row 1 is the header
                    tracing::warn!("Skipping unreadable log row {}: {}", row_num + 2, e);
                }
            }
        }

        file.unlock()?;
        tracing::debug!("Read {} records from {:?}", records.len(), self.path);
        Ok(records)
    }

    fn open_for_append(&self) -> Result<File> {
        Ok(OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?)
    }

    fn write_header_if_empty(&self, file: &File) -> Result<()> {
        if file.metadata()?.len() > 0 {
            return Ok(());
        }
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(LOG_HEADER)?;
        writer.flush()?;
        tracing::info!("Initialized set log at {:?}", self.path);
        Ok(())
    }

    fn write_record(&self, file: &File, record: &SetRecord) -> Result<()> {
        // The log may have been deleted or truncated since `open`
        self.write_header_if_empty(file)?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}

impl SetLog for CsvSetLog {
    fn append(&mut self, exercise: &str, weight: &str, reps: &str) -> Result<SetRecord> {
        let today = Local::now().date_naive();
        self.append_on(today, exercise, weight, reps)
    }

    fn most_recent(&self, exercise: &str) -> Result<HistorySummary> {
        let summary = self
            .records()?
            .iter()
            .rev()
            .find(|r| r.exercise == exercise)
            .map(SetRecord::summary)
            .unwrap_or(HistorySummary::New);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_open_writes_header() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log = CsvSetLog::open(temp_dir.path()).unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents, "Date,Exercise,Weight,Reps,1RM\n");
        assert!(log.path().ends_with(LOG_FILE_NAME));
    }

    #[test]
    fn test_open_creates_missing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("a").join("b");
        let log = CsvSetLog::open(&dir).unwrap();
        assert!(log.path().exists());
    }

    #[test]
    fn test_reopen_keeps_existing_records() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut log = CsvSetLog::open(temp_dir.path()).unwrap();
        log.append_on(date(1), "Squat", "100", "5").unwrap();

        let reopened = CsvSetLog::open(temp_dir.path()).unwrap();
        let records = reopened.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].exercise, "Squat");
    }

    #[test]
    fn test_append_row_format() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut log = CsvSetLog::open(temp_dir.path()).unwrap();

        let record = log.append_on(date(3), "Bench Press", " 100 ", "10").unwrap();
        assert_eq!(record.one_rep_max, 133);
        assert_eq!(record.weight, "100");

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines[1], "2024-05-03,Bench Press,100,10,133");
    }

    #[test]
    fn test_append_out_of_range_reps() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut log = CsvSetLog::open(temp_dir.path()).unwrap();

        let record = log
            .append_on(date(3), "Squat", "100", "9223372036854775807")
            .unwrap();
        assert_eq!(record.one_rep_max, i64::MAX);
        assert_eq!(
            log.most_recent("Squat").unwrap().to_string(),
            "last: 100kg x 9223372036854775807"
        );
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut log = CsvSetLog::open(temp_dir.path()).unwrap();
        log.append_on(date(3), "Curl, Hammer", "20", "12").unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.contains("\"Curl, Hammer\""));
        assert_eq!(
            log.most_recent("Curl, Hammer").unwrap().to_string(),
            "last: 20kg x 12"
        );
    }

    #[test]
    fn test_most_recent_uses_last_append_per_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut log = CsvSetLog::open(temp_dir.path()).unwrap();

        log.append_on(date(1), "Squat", "100", "5").unwrap();
        log.append_on(date(1), "Bench Press", "80", "5").unwrap();
        log.append_on(date(2), "Squat", "105", "5").unwrap();
        log.append_on(date(2), "Deadlift", "140", "3").unwrap();
        log.append_on(date(3), "Bench Press", "82.5", "4").unwrap();

        assert_eq!(log.most_recent("Squat").unwrap().to_string(), "last: 105kg x 5");
        assert_eq!(
            log.most_recent("Bench Press").unwrap().to_string(),
            "last: 82.5kg x 4"
        );
        assert_eq!(
            log.most_recent("Deadlift").unwrap().to_string(),
            "last: 140kg x 3"
        );
    }

    #[test]
    fn test_most_recent_is_exact_match() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut log = CsvSetLog::open(temp_dir.path()).unwrap();
        log.append_on(date(1), "Squat", "100", "5").unwrap();

        assert_eq!(log.most_recent("squat").unwrap(), HistorySummary::New);
        assert_eq!(log.most_recent("Squat ").unwrap(), HistorySummary::New);
    }

    #[test]
    fn test_never_logged_is_new() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log = CsvSetLog::open(temp_dir.path()).unwrap();
        assert_eq!(log.most_recent("Never Logged").unwrap(), HistorySummary::New);
        assert_eq!(log.most_recent("Never Logged").unwrap().to_string(), "new");
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log = CsvSetLog::open(temp_dir.path()).unwrap();
        std::fs::remove_file(log.path()).unwrap();

        assert!(log.records().unwrap().is_empty());
        assert_eq!(log.most_recent("Squat").unwrap(), HistorySummary::New);
    }

    #[test]
    fn test_append_after_deletion_restores_header() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut log = CsvSetLog::open(temp_dir.path()).unwrap();
        std::fs::remove_file(log.path()).unwrap();

        log.append_on(date(4), "Squat", "100", "5").unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert!(contents.starts_with("Date,Exercise,Weight,Reps,1RM\n"));
        assert_eq!(log.records().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_rows_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut log = CsvSetLog::open(temp_dir.path()).unwrap();
        log.append_on(date(1), "Squat", "100", "5").unwrap();

        // Simulate a half-written row and garbage
        let mut contents = std::fs::read_to_string(log.path()).unwrap();
        contents.push_str("not-a-date,Squat\n");
        contents.push_str("garbage\n");
        std::fs::write(log.path(), contents).unwrap();

        log.append_on(date(2), "Bench Press", "80", "8").unwrap();

        let records = log.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(log.most_recent("Squat").unwrap().to_string(), "last: 100kg x 5");
    }

    #[test]
    fn test_append_stamps_today() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut log = CsvSetLog::open(temp_dir.path()).unwrap();
        let record = log.append("Squat", "100", "5").unwrap();
        assert_eq!(record.date, Local::now().date_naive());
    }

    #[test]
    fn test_append_fails_when_location_unwritable() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut log = CsvSetLog::open(temp_dir.path()).unwrap();

        // Replace the log file with a directory so opening for append fails
        std::fs::remove_file(log.path()).unwrap();
        std::fs::create_dir(log.path()).unwrap();

        assert!(log.append("Squat", "100", "5").is_err());
    }
}
