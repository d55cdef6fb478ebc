//! Organizer engine
//!
//! Walks an input directory tree, classifies and dates every media file,
//! optionally relocates files into a date-partitioned destination tree,
//! and accumulates per-field frequency tables plus run totals.
//!
//! The walk is synchronous and sequential: one file is fully processed
//! before the next is visited. Every per-file failure is caught, logged,
//! and counted where the error taxonomy requires it; nothing propagates to
//! the caller.

use crate::classify::{self, MediaKind};
use crate::config::{Config, FileOperation};
use crate::error::{Error, Result};
use crate::i18n::Strings;
use crate::metadata::{self, exif};
use crate::normalize;
use crate::stats::RunStats;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, error, info, span, warn};
use walkdir::WalkDir;

/// Destination directory name used when none is configured
const DEFAULT_DEST_DIR: &str = "Organized_Photos";

/// Subtree collecting video files under the destination root
const VIDEO_SUBDIR: &str = "Videos";

/// Result of one organize run: the append-only log plus the aggregates
#[derive(Debug)]
pub struct OrganizeOutcome {
    pub log: Vec<String>,
    pub stats: RunStats,
}

/// Run one classification pass over `config.input_path`
///
/// The only hard precondition is an existing input path; a missing one
/// yields a single localized log line and empty stats. Everything else is
/// recovered per file and the walk runs to completion.
pub fn organize(config: &Config) -> OrganizeOutcome {
    let _span = span!(Level::INFO, "organize", input = %config.input_path.display()).entered();

    let mut log = Vec::new();
    let mut stats = RunStats::new();

    if !config.input_path.exists() {
        warn!(input = %config.input_path.display(), "Input path does not exist");
        log.push(Strings::invalid_input_path().to_string());
        return OrganizeOutcome { log, stats };
    }

    let dest_root = resolve_dest_root(config);
    if let Err(e) = fs::create_dir_all(&dest_root) {
        error!(dest = %dest_root.display(), error = %e, "Failed to create destination root");
        log.push(format!("Error creating '{}': {}", dest_root.display(), e));
    }

    info!(
        dest = %dest_root.display(),
        stats_only = config.stats_only,
        "Scanning input directory"
    );

    for entry in WalkDir::new(&config.input_path)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let kind = classify::classify_path(path);
        if !kind.is_supported() {
            continue;
        }
        process_file(path, kind, &dest_root, config, &mut log, &mut stats);
    }

    let (start_date, end_date) = stats.date_range();
    log.push(format!("Total files: {}", stats.total_files));
    log.push(format!("Date range: {} to {}", start_date, end_date));
    log.push("Stats collected.".to_string());
    log.push(format!("File read failures: {}", stats.error_count));

    info!("{}", stats.summary());

    OrganizeOutcome { log, stats }
}

/// Use the configured destination, else `Organized_Photos` next to the input
fn resolve_dest_root(config: &Config) -> PathBuf {
    match &config.dest_root {
        Some(dest) => dest.clone(),
        None => config
            .input_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(DEFAULT_DEST_DIR),
    }
}

/// Classify, date, aggregate, and (unless stats-only) relocate one file
fn process_file(
    path: &Path,
    kind: MediaKind,
    dest_root: &Path,
    config: &Config,
    log: &mut Vec<String>,
    stats: &mut RunStats,
) {
    let _span = span!(Level::DEBUG, "process_file", ?path).entered();

    if kind == MediaKind::Video {
        stats.video_files += 1;
    }

    // Always succeeds, possibly via the modification-time fallback
    let capture = metadata::read_capture_time(path);
    stats.record_date(&capture.date);
    stats.record_hour(&capture.hour);

    let file_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .map(str::to_owned)
        .unwrap_or_else(|| path.display().to_string());

    if kind == MediaKind::Image {
        match exif::read_snapshot(path) {
            Ok(snapshot) => {
                stats.record_snapshot(&snapshot);
                log.push(format!(
                    "EXIF read for {}: Camera={}, FocalLength={}, ISO={}, Shutter={}, Aperture={}",
                    file_name,
                    snapshot.camera,
                    normalize::focal_length_key(&snapshot.focal_length),
                    snapshot.iso,
                    snapshot.shutter_speed,
                    snapshot.f_number
                ));
            }
            Err(e) => {
                debug!(?path, error = %e, "EXIF extraction failed");
                log.push(format!("Error reading EXIF for {}: {}", file_name, e));
                stats.error_count += 1;
            }
        }
    }

    if config.stats_only {
        return;
    }

    let dest_dir = if kind == MediaKind::Video {
        dest_root.join(VIDEO_SUBDIR).join(&capture.date)
    } else {
        dest_root.join(&capture.date)
    };

    match relocate(path, &dest_dir, &file_name, config.operation) {
        Ok(dest_path) => {
            info!(source = ?path, dest = ?dest_path, source_kind = ?capture.source, "Relocated file");
            log.push(format!(
                "{} {} to {}",
                config.operation.past_tense(),
                file_name,
                dest_path.display()
            ));
            stats.total_files += 1;
        }
        Err(e) => {
            // Excluded from the total-files counter; the walk continues
            error!(?path, error = %e, "Relocation failed");
            log.push(format!("Error moving/copying '{}': {}", path.display(), e));
        }
    }
}

/// Place one file into `dest_dir`, resolving a name collision once
///
/// Collision policy: an existing destination name gets `_copy` inserted
/// before the extension. A second collision on the `_copy` name is not
/// disambiguated further.
fn relocate(
    source: &Path,
    dest_dir: &Path,
    file_name: &str,
    operation: FileOperation,
) -> Result<PathBuf> {
    fs::create_dir_all(dest_dir)?;

    let mut dest_path = dest_dir.join(file_name);
    if dest_path.exists() {
        dest_path = dest_dir.join(copy_name(file_name));
        debug!(?dest_path, "Destination name taken, using _copy suffix");
    }

    perform_operation(source, &dest_path, operation).map_err(|e| Error::Relocate {
        from: source.to_path_buf(),
        to: dest_path.clone(),
        message: e.to_string(),
    })?;

    Ok(dest_path)
}

/// Insert `_copy` before the extension: `img.jpg` becomes `img_copy.jpg`
fn copy_name(file_name: &str) -> String {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}_copy.{ext}"),
        None => format!("{stem}_copy"),
    }
}

/// Perform the actual file operation (copy or move)
fn perform_operation(
    source: &Path,
    dest: &Path,
    operation: FileOperation,
) -> std::io::Result<()> {
    // Capture the source mtime before a move removes the source
    let modified = fs::metadata(source).and_then(|m| m.modified()).ok();

    match operation {
        FileOperation::Copy => {
            copy_file(source, dest)?;
        }
        FileOperation::Move => {
            // Try rename first (faster for same filesystem)
            if fs::rename(source, dest).is_err() {
                // Fall back to copy + delete for cross-filesystem moves
                copy_file(source, dest)?;
                fs::remove_file(source)?;
            }
        }
    }

    // Preserve the original modification time on the destination
    if let Some(mtime) = modified {
        let _ = filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime));
    }

    Ok(())
}

/// Copy file with buffered I/O
fn copy_file(source: &Path, dest: &Path) -> std::io::Result<()> {
    let src_file = File::open(source)?;
    let dest_file = File::create(dest)?;

    let mut reader = BufReader::with_capacity(256 * 1024, src_file);
    let mut writer = BufWriter::with_capacity(256 * 1024, dest_file);

    let mut buffer = vec![0u8; 256 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        writer.write_all(&buffer[..bytes_read])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local};
    use filetime::FileTime;
    use tempfile::TempDir;

    /// Fixed mtime so fallback dates are deterministic per test run
    const MTIME: i64 = 1_684_000_000;

    fn write_media(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"media bytes").unwrap();
        filetime::set_file_mtime(&path, FileTime::from_unix_time(MTIME, 0)).unwrap();
        path
    }

    /// The date every pinned file falls back to, via the same local-time
    /// conversion the reader uses
    fn pinned_date(path: &Path) -> String {
        let modified: DateTime<Local> =
            fs::metadata(path).unwrap().modified().unwrap().into();
        modified.format("%Y-%m-%d").to_string()
    }

    fn test_config(input: &Path, dest: &Path) -> Config {
        Config {
            input_path: input.to_path_buf(),
            dest_root: Some(dest.to_path_buf()),
            ..Config::default()
        }
    }

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("input");
        let dest = root.path().join("dest");
        fs::create_dir_all(&input).unwrap();
        (root, input, dest)
    }

    #[test]
    fn test_missing_root_returns_single_log_line() {
        let config = Config {
            input_path: PathBuf::from("/nonexistent/photo/tree"),
            ..Config::default()
        };

        let outcome = organize(&config);
        assert_eq!(outcome.log.len(), 1);
        assert_eq!(outcome.stats.total_files, 0);
        assert_eq!(outcome.stats.error_count, 0);
        assert!(outcome.stats.date.is_empty());
    }

    #[test]
    fn test_copy_organizes_by_date() {
        let (_root, input, dest) = setup();
        let photo = write_media(&input, "photo.jpg");
        let clip = write_media(&input, "nested/clip.mov");
        let date = pinned_date(&photo);

        let outcome = organize(&test_config(&input, &dest));

        assert!(dest.join(&date).join("photo.jpg").exists());
        assert!(dest.join("Videos").join(&date).join("clip.mov").exists());
        // Copy mode never deletes originals
        assert!(photo.exists());
        assert!(clip.exists());

        assert_eq!(outcome.stats.total_files, 2);
        assert_eq!(outcome.stats.video_files, 1);
        assert_eq!(outcome.stats.date.values().sum::<u64>(), 2);
        assert_eq!(outcome.stats.date_range(), (date.clone(), date));
        // The dateless jpg has no EXIF container
        assert_eq!(outcome.stats.error_count, 1);
    }

    #[test]
    fn test_move_removes_source() {
        let (_root, input, dest) = setup();
        let photo = write_media(&input, "photo.jpg");
        let date = pinned_date(&photo);

        let config = Config {
            operation: FileOperation::Move,
            ..test_config(&input, &dest)
        };
        let outcome = organize(&config);

        assert!(!photo.exists());
        assert!(dest.join(&date).join("photo.jpg").exists());
        assert_eq!(outcome.stats.total_files, 1);
    }

    #[test]
    fn test_stats_only_does_not_relocate() {
        let (_root, input, dest) = setup();
        write_media(&input, "photo.jpg");
        write_media(&input, "clip.mp4");

        let config = Config {
            stats_only: true,
            ..test_config(&input, &dest)
        };
        let outcome = organize(&config);

        // Destination root is created, but stays empty
        assert!(dest.exists());
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);

        // Aggregates are still complete; total counts relocations only
        assert_eq!(outcome.stats.total_files, 0);
        assert_eq!(outcome.stats.video_files, 1);
        assert_eq!(outcome.stats.date.values().sum::<u64>(), 2);
    }

    #[test]
    fn test_collision_appends_copy_suffix() {
        let (_root, input, dest) = setup();
        write_media(&input, "a/dup.jpg");
        write_media(&input, "b/dup.jpg");
        let date = pinned_date(&input.join("a/dup.jpg"));

        let outcome = organize(&test_config(&input, &dest));

        // Both survive: one under the original name, one with _copy
        assert!(dest.join(&date).join("dup.jpg").exists());
        assert!(dest.join(&date).join("dup_copy.jpg").exists());
        assert_eq!(outcome.stats.total_files, 2);
    }

    #[test]
    fn test_unsupported_files_are_invisible() {
        let (_root, input, dest) = setup();
        write_media(&input, "notes.txt");
        write_media(&input, "archive.zip");

        let outcome = organize(&test_config(&input, &dest));

        assert_eq!(outcome.stats.total_files, 0);
        assert_eq!(outcome.stats.error_count, 0);
        assert!(outcome.stats.date.is_empty());
        assert!(outcome.stats.hour.is_empty());
        // Only the four summary lines remain in the log
        assert_eq!(outcome.log.len(), 4);
    }

    #[test]
    fn test_exif_failure_still_counts_date_stats() {
        let (_root, input, dest) = setup();
        write_media(&input, "broken.jpg");

        let config = Config {
            stats_only: true,
            ..test_config(&input, &dest)
        };
        let outcome = organize(&config);

        assert_eq!(outcome.stats.error_count, 1);
        assert_eq!(outcome.stats.date.values().sum::<u64>(), 1);
        assert!(
            outcome
                .log
                .iter()
                .any(|line| line.starts_with("Error reading EXIF for broken.jpg"))
        );
    }

    #[test]
    fn test_copy_name() {
        assert_eq!(copy_name("img.jpg"), "img_copy.jpg");
        assert_eq!(copy_name("archive.tar.gz"), "archive.tar_copy.gz");
        assert_eq!(copy_name("noext"), "noext_copy");
    }

    #[test]
    fn test_default_dest_root_sits_next_to_input() {
        let config = Config {
            input_path: PathBuf::from("/photos/2023"),
            ..Config::default()
        };
        assert_eq!(
            resolve_dest_root(&config),
            PathBuf::from("/photos/Organized_Photos")
        );
    }
}
