//! EXIF parsing: capture timestamp and the aggregated field snapshot

use crate::error::{Error, Result};
use crate::normalize::UNKNOWN;
use chrono::NaiveDateTime;
use exif::{Exif, In, Reader, Tag};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::trace;

/// Capture timestamp pattern fixed by the EXIF specification
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Read the capture timestamp (`DateTimeOriginal`) from an image file
pub fn read_datetime(path: &Path) -> Result<NaiveDateTime> {
    let exif = read_container(path)?;

    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or_else(|| Error::ExifRead {
            path: path.to_path_buf(),
            message: "no DateTimeOriginal tag".to_string(),
        })?;

    let raw = field.display_value().to_string();
    match parse_exif_datetime(&raw) {
        Some(timestamp) => {
            trace!(?path, %timestamp, "Found EXIF capture timestamp");
            Ok(timestamp)
        }
        None => Err(Error::TimestampParse { value: raw }),
    }
}

/// Parse an EXIF datetime string: "YYYY:MM:DD HH:MM:SS", possibly quoted
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_matches('"');
    NaiveDateTime::parse_from_str(s, EXIF_DATETIME_FORMAT).ok()
}

/// Camera metadata extracted from one image
///
/// Every field is always present, default-filled with `"Unknown"`, so
/// downstream aggregation never needs existence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifSnapshot {
    /// Camera body model (`Model`)
    pub camera: String,
    pub make: String,
    pub lens_model: String,
    pub focal_length: String,
    pub focal_length_35mm: String,
    pub iso: String,
    pub exposure_time: String,
    /// `ExposureTime` when present, else `ShutterSpeedValue`
    pub shutter_speed: String,
    pub f_number: String,
    pub exposure_program: String,
    pub orientation: String,
}

impl Default for ExifSnapshot {
    fn default() -> Self {
        let unknown = || UNKNOWN.to_string();
        Self {
            camera: unknown(),
            make: unknown(),
            lens_model: unknown(),
            focal_length: unknown(),
            focal_length_35mm: unknown(),
            iso: unknown(),
            exposure_time: unknown(),
            shutter_speed: unknown(),
            f_number: unknown(),
            exposure_program: unknown(),
            orientation: unknown(),
        }
    }
}

/// Extract the full field snapshot from an image
///
/// Fails only when the file cannot be opened or its EXIF container cannot
/// be parsed; individual missing fields default to `"Unknown"` without
/// discarding the snapshot.
pub fn read_snapshot(path: &Path) -> Result<ExifSnapshot> {
    let exif = read_container(path)?;
    let field = |tag: Tag| field_value(&exif, tag);

    let exposure_time = field(Tag::ExposureTime);
    let shutter_speed = if exposure_time != UNKNOWN {
        exposure_time.clone()
    } else {
        field(Tag::ShutterSpeedValue)
    };

    Ok(ExifSnapshot {
        camera: field(Tag::Model),
        make: field(Tag::Make),
        lens_model: field(Tag::LensModel),
        focal_length: field(Tag::FocalLength),
        focal_length_35mm: field(Tag::FocalLengthIn35mmFilm),
        iso: field(Tag::PhotographicSensitivity),
        exposure_time,
        shutter_speed,
        f_number: field(Tag::FNumber),
        exposure_program: field(Tag::ExposureProgram),
        orientation: field(Tag::Orientation),
    })
}

fn read_container(path: &Path) -> Result<Exif> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| Error::ExifRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Display value of a tag with surrounding quotes trimmed
fn field_value(exif: &Exif, tag: Tag) -> String {
    match exif.get_field(tag, In::PRIMARY) {
        Some(field) => field
            .display_value()
            .to_string()
            .trim()
            .trim_matches('"')
            .to_string(),
        None => UNKNOWN.to_string(),
    }
}
