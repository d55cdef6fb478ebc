//! Media type classification from file extensions

use std::path::Path;

/// Image extensions eligible for EXIF extraction and date sorting
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "heic", "cr2", "nef", "arw", "raf", "dng",
];

/// Video extensions, sorted under a separate Videos tree
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// Media type of a file, determined solely by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    /// Neither image nor video; skipped entirely (not counted, not logged)
    Unsupported,
}

impl MediaKind {
    pub fn is_supported(self) -> bool {
        !matches!(self, MediaKind::Unsupported)
    }
}

/// Classify a file extension (without the dot), case-insensitively
pub fn classify_extension(ext: &str) -> MediaKind {
    let ext_lower = ext.to_lowercase();
    if IMAGE_EXTENSIONS.iter().any(|e| *e == ext_lower) {
        MediaKind::Image
    } else if VIDEO_EXTENSIONS.iter().any(|e| *e == ext_lower) {
        MediaKind::Video
    } else {
        MediaKind::Unsupported
    }
}

/// Classify a path by its extension; extension-less paths are unsupported
pub fn classify_path(path: &Path) -> MediaKind {
    path.extension()
        .and_then(|e| e.to_str())
        .map(classify_extension)
        .unwrap_or(MediaKind::Unsupported)
}
