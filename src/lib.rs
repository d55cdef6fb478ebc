//! Photo Organizer - capture-date media organization with EXIF statistics
//!
//! This library classifies a directory tree of media files by capture date
//! with support for:
//! - EXIF capture-timestamp extraction with file-mtime fallback
//! - Date-partitioned relocation (copy or move) with collision handling
//! - Per-field EXIF frequency tables (camera, ISO, aperture, shutter, ...)
//! - Chart-ready label/value series with per-field sort policies
//! - A stats-only mode that computes aggregates without touching files

pub mod charts;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod i18n;
pub mod metadata;
pub mod normalize;
pub mod organizer;
pub mod stats;

pub use charts::{ChartSeries, build_series};
pub use classify::MediaKind;
pub use cli::Cli;
pub use config::{Config, FileOperation};
pub use error::{Error, Result};
pub use metadata::exif::ExifSnapshot;
pub use metadata::{CaptureTime, TimeSource};
pub use organizer::{OrganizeOutcome, organize};
pub use stats::{FrequencyTable, RunStats};
