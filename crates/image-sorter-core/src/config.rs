use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Configuration for a sorting run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder whose images are renamed in place
    pub image_dir: PathBuf,

    /// Run-state file holding the prefix toggle and the chosen mode
    pub state_file: PathBuf,

    /// Whether to run without making changes
    pub dry_run: bool,

    /// Whether to move every image to a temporary name before sorting
    pub stage_files: bool,

    /// Number of threads to use for decoding (0 = auto)
    pub threads: usize,

    /// Whether to draw a progress bar while decoding
    pub show_progress: bool,

    /// Directory for rotated log files
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("images"),
            state_file: PathBuf::from("options.txt"),
            dry_run: false,
            stage_files: true,
            threads: 0, // Auto
            show_progress: true,
            log_dir: PathBuf::from("logs"),
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.image_dir.as_os_str().is_empty() {
            return Err(Error::Configuration(
                "Image directory must not be empty".to_string(),
            ));
        }

        // Anything inside the image directory is a rename candidate
        if self.state_file.starts_with(&self.image_dir) {
            return Err(Error::Configuration(format!(
                "State file {} must not live inside the image directory",
                self.state_file.display()
            )));
        }

        if self.log_dir.starts_with(&self.image_dir) {
            return Err(Error::Configuration(format!(
                "Log directory {} must not live inside the image directory",
                self.log_dir.display()
            )));
        }

        Ok(())
    }

    /// Number of worker threads to decode with
    pub fn worker_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}
