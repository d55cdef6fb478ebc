//! Photo Organizer - CLI host
//!
//! Thin binary around the organizer library: resolves configuration,
//! sets up logging, runs one organize pass, and prints the run log and a
//! styled stat summary. Chart-ready statistics can be exported as JSON
//! for an external dashboard.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use photo_organizer::i18n::Strings;
use photo_organizer::{Cli, Config, OrganizeOutcome, build_series, organize};
use std::path::{Path, PathBuf};
use tracing::{Level, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// CLI output module
mod cli_output {
    //! Styled terminal output helpers for the summary block

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stdout;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const SUCCESS: Color = Color::Green;
        pub const WARNING: Color = Color::Yellow;
        pub const ERROR: Color = Color::Red;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    pub fn print_separator() {
        let _ = stdout().execute(Print(&format!("{}\n", "─".repeat(60))));
    }

    pub fn print_title(title: &str) {
        let width: usize = 60;
        let padding = width.saturating_sub(title.len()) / 2;
        let left_pad = " ".repeat(padding.saturating_sub(1));

        let _ = stdout().execute(Print(&format!("{}{}\n", left_pad, title.bold())));
    }

    pub fn print_warning(msg: &str) {
        let _ = stdout().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    pub fn print_hint(msg: &str) {
        let _ = stdout().execute(Print(style("→ ").with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!("{}\n", msg)));
    }

    pub fn print_stat(key: &str, value: &str, color: Color) {
        let key_styled = style(key).with(CliTheme::HINT);
        let value_styled = style(value).with(color).bold();
        let _ = stdout().execute(Print("  "));
        let _ = stdout().execute(Print(key_styled));
        let _ = stdout().execute(Print(": "));
        let _ = stdout().execute(Print(value_styled));
        let _ = stdout().execute(Print("\n"));
    }

    pub fn print_log_path(label: &str, path: &str) {
        let _ = stdout().execute(Print("\n"));
        let _ = stdout().execute(Print(style("  📁 ").with(CliTheme::ACCENT)));
        let _ = stdout().execute(Print(style(label).with(CliTheme::HINT)));
        let _ = stdout().execute(Print(format!(" {}\n", path)));
    }

    pub fn print_blank() {
        let _ = stdout().execute(Print("\n"));
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Get the executable directory for the Log directory
    let exe_dir = get_executable_dir()?;

    // Determine log file path based on config file or timestamp
    let log_path = get_log_path(&exe_dir, &cli);

    // Setup logging
    let _guard = setup_logging(&cli, &log_path)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Photo Organizer starting"
    );

    // Load configuration
    let config = load_config(&cli)?;

    if config.verbose {
        info!(?config, "Configuration loaded");
    }

    info!(log_file = %log_path.display(), "Log file location");

    // Run the organizer; per-file failures are inside the returned log
    let outcome = organize(&config);

    use cli_output::*;

    if config.verbose {
        print_separator();
        for line in &outcome.log {
            print_hint(line);
        }
    }

    print_separator();
    print_title(Strings::organization_complete());
    print_separator();
    print_blank();

    let stats = &outcome.stats;
    let (start_date, end_date) = stats.date_range();

    print_stat(
        Strings::stat_total_files(),
        &stats.total_files.to_string(),
        CliTheme::SUCCESS,
    );
    print_stat(
        Strings::stat_video_files(),
        &stats.video_files.to_string(),
        CliTheme::ACCENT,
    );
    print_stat(
        Strings::stat_failures(),
        &stats.error_count.to_string(),
        CliTheme::ERROR,
    );
    print_stat(
        Strings::stat_date_range(),
        &format!("{} ~ {}", start_date, end_date),
        CliTheme::ACCENT,
    );

    let cameras: Vec<&str> = stats.camera.keys().map(String::as_str).collect();
    let cameras = if cameras.is_empty() {
        "N/A".to_string()
    } else {
        cameras.join(", ")
    };
    print_stat(Strings::stat_cameras(), &cameras, CliTheme::HINT);
    print_blank();

    if config.stats_only {
        print_warning(Strings::stats_only_notice());
    }

    if let Some(ref stats_out) = cli.stats_out {
        write_stats_json(stats_out, &outcome)?;
        print_hint(&format!(
            "{} {}",
            Strings::stats_written_to(),
            stats_out.display()
        ));
    }

    print_separator();
    print_log_path(Strings::log_file(), &log_path.display().to_string());

    info!(log_file = %log_path.display(), "Run complete");

    Ok(())
}

/// Export the run stats and derived chart series for an external dashboard
fn write_stats_json(path: &Path, outcome: &OrganizeOutcome) -> Result<()> {
    let charts = build_series(&outcome.stats);
    let payload = serde_json::json!({
        "stats": outcome.stats,
        "charts": charts,
        "date_range": outcome.stats.date_range(),
        "log": outcome.log,
    });

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&payload)?)?;

    Ok(())
}

/// Get the directory where the executable is located
fn get_executable_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe()?;
    Ok(exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Determine the log file path based on config file or timestamp
fn get_log_path(exe_dir: &Path, cli: &Cli) -> PathBuf {
    let log_dir = exe_dir.join("Log");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    if let Some(config_name) = cli.config_name() {
        log_dir.join(format!("{}_{}.log", config_name, timestamp))
    } else {
        log_dir.join(format!("Run_{}.log", timestamp))
    }
}

/// Resolve config path - a missing extension defaults to .toml
fn resolve_config_path(config_path: &Path) -> PathBuf {
    if config_path.exists() {
        return config_path.to_path_buf();
    }

    if config_path.extension().is_none() {
        let with_extension = config_path.with_extension("toml");
        if with_extension.exists() {
            return with_extension;
        }
    }

    config_path.to_path_buf()
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        let resolved_path = resolve_config_path(config_path);
        info!(config_file = %resolved_path.display(), "Loading configuration from file");
        let file_config = Config::load_from_file(&resolved_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()
    };

    if config.input_path.as_os_str().is_empty() {
        anyhow::bail!("{}", Strings::no_input_error());
    }

    Ok(config)
}

/// Setup logging (file + stderr)
fn setup_logging(cli: &Cli, log_path: &Path) -> Result<Option<WorkerGuard>> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(Some(guard))
}
