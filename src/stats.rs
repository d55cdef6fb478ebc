//! Frequency tables and per-run statistics accumulation

use crate::metadata::exif::ExifSnapshot;
use crate::normalize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mapping from a value category to its occurrence count
pub type FrequencyTable = BTreeMap<String, u64>;

/// Aggregate result of one classification pass
///
/// Created fresh per run and owned exclusively by it; returned immutable
/// once the walk completes. There is no cross-run accumulation.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    /// Two-level breakdown: camera model -> focal length -> count
    pub camera: BTreeMap<String, FrequencyTable>,
    pub iso: FrequencyTable,
    pub shutter: FrequencyTable,
    pub aperture: FrequencyTable,
    pub date: FrequencyTable,
    pub hour: FrequencyTable,
    pub exposure_program: FrequencyTable,
    pub fnumber: FrequencyTable,
    pub exposure_time: FrequencyTable,
    pub focal35: FrequencyTable,
    pub lens_model: FrequencyTable,
    pub make: FrequencyTable,
    pub orientation: FrequencyTable,
    /// Files successfully relocated (stays 0 in stats-only runs)
    pub total_files: u64,
    pub video_files: u64,
    pub error_count: u64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the derived capture date (`YYYY-MM-DD`) of one file
    pub fn record_date(&mut self, date: &str) {
        bump(&mut self.date, date);
    }

    /// Record the derived hour bucket (`YYYY-MM-DD HH:00`) of one file
    pub fn record_hour(&mut self, hour: &str) {
        bump(&mut self.hour, hour);
    }

    /// Fold one image's EXIF snapshot into every per-field table
    ///
    /// The snapshot is default-filled, so each call bumps every table by
    /// exactly one: per-field sums stay equal to the number of snapshots
    /// recorded.
    pub fn record_snapshot(&mut self, snapshot: &ExifSnapshot) {
        let focal = normalize::focal_length_key(&snapshot.focal_length);
        bump(
            self.camera.entry(snapshot.camera.clone()).or_default(),
            &focal,
        );
        bump(&mut self.iso, &snapshot.iso);
        bump(&mut self.shutter, &snapshot.shutter_speed);
        bump(&mut self.aperture, &snapshot.f_number);
        bump(&mut self.exposure_program, &snapshot.exposure_program);
        bump(&mut self.fnumber, &snapshot.f_number);
        bump(&mut self.exposure_time, &snapshot.exposure_time);
        bump(&mut self.focal35, &snapshot.focal_length_35mm);
        bump(&mut self.lens_model, &snapshot.lens_model);
        bump(&mut self.make, &snapshot.make);
        bump(&mut self.orientation, &snapshot.orientation);
    }

    /// Min/max observed capture dates, or `("N/A", "N/A")` when none
    pub fn date_range(&self) -> (String, String) {
        match (self.date.first_key_value(), self.date.last_key_value()) {
            (Some((min, _)), Some((max, _))) => (min.clone(), max.clone()),
            _ => ("N/A".to_string(), "N/A".to_string()),
        }
    }

    pub fn summary(&self) -> String {
        let (start, end) = self.date_range();
        format!(
            "Total: {}, Videos: {}, Failures: {}, Date range: {} to {}",
            self.total_files, self.video_files, self.error_count, start, end
        )
    }
}

fn bump(table: &mut FrequencyTable, key: &str) {
    *table.entry(key.to_string()).or_insert(0) += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(camera: &str, iso: &str) -> ExifSnapshot {
        ExifSnapshot {
            camera: camera.to_string(),
            iso: iso.to_string(),
            ..ExifSnapshot::default()
        }
    }

    #[test]
    fn test_record_snapshot_sums() {
        let mut stats = RunStats::new();
        stats.record_snapshot(&snapshot("X100V", "200"));
        stats.record_snapshot(&snapshot("X100V", "400"));
        stats.record_snapshot(&snapshot("A7 IV", "200"));

        // Every per-field table sums to the number of snapshots recorded
        assert_eq!(stats.iso.values().sum::<u64>(), 3);
        assert_eq!(stats.orientation.values().sum::<u64>(), 3);
        assert_eq!(stats.iso["200"], 2);
        assert_eq!(stats.iso["400"], 1);

        // Two-level camera table sums the same way
        let per_camera: u64 = stats
            .camera
            .values()
            .map(|focal| focal.values().sum::<u64>())
            .sum();
        assert_eq!(per_camera, 3);
        assert_eq!(stats.camera["X100V"].values().sum::<u64>(), 2);
    }

    #[test]
    fn test_default_snapshot_fills_unknown() {
        let mut stats = RunStats::new();
        stats.record_snapshot(&ExifSnapshot::default());
        assert_eq!(stats.iso["Unknown"], 1);
        assert_eq!(stats.camera["Unknown"]["0"], 1);
    }

    #[test]
    fn test_date_range() {
        let mut stats = RunStats::new();
        assert_eq!(stats.date_range(), ("N/A".to_string(), "N/A".to_string()));

        stats.record_date("2023-05-01");
        stats.record_date("2022-12-31");
        stats.record_date("2023-05-02");
        assert_eq!(
            stats.date_range(),
            ("2022-12-31".to_string(), "2023-05-02".to_string())
        );
    }
}
