//! Configuration types for the photo organizer

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File relocation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FileOperation {
    /// Copy files to the destination, originals untouched
    #[default]
    Copy,
    /// Move files to the destination
    Move,
}

impl FileOperation {
    /// Past-tense verb used in the run log
    pub fn past_tense(self) -> &'static str {
        match self {
            FileOperation::Copy => "Copied",
            FileOperation::Move => "Moved",
        }
    }
}

/// Configuration for one organize run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory tree to classify
    pub input_path: PathBuf,

    /// Destination root for organized files
    ///
    /// Defaults to `Organized_Photos` next to the input directory.
    #[serde(default)]
    pub dest_root: Option<PathBuf>,

    /// File operation mode
    #[serde(default)]
    pub operation: FileOperation,

    /// Compute all aggregates without relocating any file
    #[serde(default)]
    pub stats_only: bool,

    /// Verbose output
    #[serde(default)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            dest_root: None,
            operation: FileOperation::default(),
            stats_only: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Photo Organizer Configuration File
# This file uses TOML format (https://toml.io)

# Directory tree to classify
input_path = "D:/Photos"

# Destination root for organized files
# Omit to use Organized_Photos next to the input directory
dest_root = "D:/Sorted"

# File operation: "copy" or "move"
operation = "copy"

# Compute statistics without relocating any file
stats_only = false

# Verbose output - show the full run log and debug-level tracing
verbose = false
"#
        .to_string()
    }
}
