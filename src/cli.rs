//! CLI argument parsing with clap

use crate::config::{Config, FileOperation};
use clap::Parser;
use std::path::PathBuf;

/// Photo Organizer - capture-date classification with EXIF statistics
///
/// Classifies photos and videos by capture date (EXIF first, file
/// modification time as fallback), relocates them into a date-partitioned
/// tree, and aggregates camera metadata into chart-ready statistics.
#[derive(Parser, Debug)]
#[command(name = "photo-organizer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments will override config file settings.
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Input directory to classify
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Destination root (default: Organized_Photos next to the input)
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// File operation mode
    #[arg(short = 'O', long, value_enum)]
    pub operation: Option<FileOperation>,

    /// Compute statistics without relocating any file
    #[arg(short, long)]
    pub stats_only: bool,

    /// Write run statistics and chart series as JSON to this path
    #[arg(long)]
    pub stats_out: Option<PathBuf>,

    /// Verbose output (full run log + debug-level tracing)
    #[arg(short, long)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long)]
    pub json_log: bool,
}

impl Cli {
    /// Get config file name (without extension) for log naming
    pub fn config_name(&self) -> Option<String> {
        self.config.as_ref().and_then(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
    }

    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(ref input) = self.input {
            config.input_path = input.clone();
        }
        if let Some(ref dest) = self.dest {
            config.dest_root = Some(dest.clone());
        }
        if let Some(operation) = self.operation {
            config.operation = operation;
        }
        if self.stats_only {
            config.stats_only = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}
