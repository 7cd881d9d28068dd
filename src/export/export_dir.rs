use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ConversionError;

/// Directory collecting the output files and error logs of one day, `<root>/YYYY.MM.DD_KML`.
#[derive(Debug)]
pub struct ExportDir {
    path: PathBuf,
}

impl ExportDir {
    pub fn create(root: &Path, date: NaiveDate) -> Result<Self, ConversionError> {
        let path = root.join(format!("{}_KML", date.format("%Y.%m.%d")));
        if path.is_dir() {
            log::debug!("Using existing export directory {:?}", path);
        } else {
            log::info!("Creating export directory {:?}", path);
            fs::create_dir_all(&path).map_err(|err| ConversionError::write_failure(&path, err))?;
        }
        Ok(Self { path })
    }

    pub fn create_for_today(root: &Path) -> Result<Self, ConversionError> {
        Self::create(root, chrono::Local::now().date_naive())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn output_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }

    /// Append to the error log of the given second, creating it when needed.
    pub fn append_error_log(
        &self,
        timestamp: NaiveDateTime,
        contents: &str,
    ) -> Result<PathBuf, ConversionError> {
        let log_filepath = self
            .path
            .join(format!("{}_error.log", timestamp.format("%Y.%m.%d_%H.%M.%S")));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_filepath)
            .map_err(|err| ConversionError::write_failure(&log_filepath, err))?;
        writeln!(file, "{}", contents)
            .map_err(|err| ConversionError::write_failure(&log_filepath, err))?;
        Ok(log_filepath)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;
    use rstest::rstest;
    use testdir::testdir;

    use super::ExportDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[rstest]
    fn test_directory_named_by_date() {
        let root = testdir!();
        let export_dir = ExportDir::create(&root, date()).unwrap();
        assert_eq!(export_dir.path(), root.join("2024.03.07_KML"));
        assert!(export_dir.path().is_dir());
        assert_eq!(
            export_dir.output_path("output_line.kml"),
            root.join("2024.03.07_KML").join("output_line.kml")
        );
    }

    #[rstest]
    fn test_existing_directory_is_reused() {
        let root = testdir!();
        let first = ExportDir::create(&root, date()).unwrap();
        fs::write(first.output_path("keep.kml"), "kept").unwrap();
        let second = ExportDir::create(&root, date()).unwrap();
        assert_eq!(
            fs::read_to_string(second.output_path("keep.kml")).unwrap(),
            "kept"
        );
    }

    #[rstest]
    fn test_error_log_is_appended() {
        let export_dir = ExportDir::create(&testdir!(), date()).unwrap();
        let timestamp = date().and_hms_opt(9, 5, 3).unwrap();
        let first = export_dir.append_error_log(timestamp, "first").unwrap();
        let second = export_dir.append_error_log(timestamp, "second").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.file_name().unwrap().to_str().unwrap(),
            "2024.03.07_09.05.03_error.log"
        );
        assert_eq!(fs::read_to_string(first).unwrap(), "first\nsecond\n");
    }

    #[rstest]
    fn test_root_that_is_a_file_fails() {
        let root = testdir!().join("not_a_dir");
        fs::write(&root, "").unwrap();
        assert!(matches!(
            ExportDir::create(&root, date()),
            Err(crate::error::ConversionError::WriteFailure { .. })
        ));
    }
}
