//! Capture time extraction
//!
//! Derives the capture date (`YYYY-MM-DD`) and hour bucket
//! (`YYYY-MM-DD HH:00`) of a media file from its embedded EXIF timestamp,
//! falling back to the file system modification time.

pub mod exif;

use chrono::{DateTime, Local, NaiveDateTime};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Source of the derived capture time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// Extracted from EXIF metadata
    Exif,
    /// From file system modification time
    FileSystem,
}

/// Derived capture time of a media file
#[derive(Debug, Clone)]
pub struct CaptureTime {
    /// Capture date, `YYYY-MM-DD`
    pub date: String,
    /// Hour bucket, `YYYY-MM-DD HH:00`
    pub hour: String,
    pub source: TimeSource,
}

impl CaptureTime {
    fn from_datetime(timestamp: NaiveDateTime, source: TimeSource) -> Self {
        Self {
            date: timestamp.format("%Y-%m-%d").to_string(),
            hour: timestamp.format("%Y-%m-%d %H:00").to_string(),
            source,
        }
    }
}

/// Extract the capture time of a media file
///
/// Tries the embedded EXIF timestamp first, then the file's modification
/// time. Never fails past this boundary; failures are logged and absorbed
/// into the fallback.
pub fn read_capture_time(path: &Path) -> CaptureTime {
    match exif::read_datetime(path) {
        Ok(timestamp) => {
            debug!(?path, "Extracted capture time from EXIF");
            CaptureTime::from_datetime(timestamp, TimeSource::Exif)
        }
        Err(e) => {
            debug!(?path, error = %e, "No EXIF capture time, using modification time");
            CaptureTime::from_datetime(fallback_time(path), TimeSource::FileSystem)
        }
    }
}

/// File modification time in local time; current time when even that fails
fn fallback_time(path: &Path) -> NaiveDateTime {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => {
            let datetime: DateTime<Local> = modified.into();
            datetime.naive_local()
        }
        Err(e) => {
            warn!(?path, error = %e, "File metadata unreadable, using current time");
            Local::now().naive_local()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use filetime::FileTime;

    #[test]
    fn test_capture_time_formats() {
        let timestamp = NaiveDate::from_ymd_opt(2023, 5, 1)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap();
        let capture = CaptureTime::from_datetime(timestamp, TimeSource::Exif);
        assert_eq!(capture.date, "2023-05-01");
        assert_eq!(capture.hour, "2023-05-01 10:00");
    }

    #[test]
    fn test_fallback_to_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jpg");
        std::fs::write(&path, b"not an image").unwrap();

        let mtime = FileTime::from_unix_time(1_684_000_000, 0);
        filetime::set_file_mtime(&path, mtime).unwrap();

        let capture = read_capture_time(&path);
        assert_eq!(capture.source, TimeSource::FileSystem);

        // Expected strings derive from the same local-time conversion
        let expected: DateTime<Local> =
            std::fs::metadata(&path).unwrap().modified().unwrap().into();
        assert_eq!(capture.date, expected.format("%Y-%m-%d").to_string());
        assert_eq!(capture.hour, expected.format("%Y-%m-%d %H:00").to_string());
    }
}
