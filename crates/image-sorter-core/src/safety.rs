use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{log_file_error, log_fs_modification};

/// Guards every filesystem change the sorter makes
pub struct SafetyManager {
    dry_run: bool,
}

impl SafetyManager {
    /// Create a new SafetyManager with the provided configuration
    pub fn new(config: &Config) -> Self {
        Self {
            dry_run: config.dry_run,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Rename `from` to `new_name` within the same directory.
    ///
    /// Never overwrites: an existing target is an error. Returns the path the
    /// file now lives at (unchanged in a dry run).
    pub fn rename(&self, from: &Path, new_name: &str) -> Result<PathBuf> {
        let to = from.with_file_name(new_name);

        if to == from {
            return Ok(to);
        }

        if !from.exists() {
            return Err(Error::Filesystem {
                from: from.to_path_buf(),
                to,
                reason: "source does not exist".to_string(),
            });
        }

        if to.exists() {
            return Err(Error::Filesystem {
                from: from.to_path_buf(),
                to,
                reason: "target already exists".to_string(),
            });
        }

        if self.dry_run {
            info!("DRY RUN - would rename {} to {}", from.display(), new_name);
            return Ok(from.to_path_buf());
        }

        fs::rename(from, &to).map_err(|e| {
            log_file_error(from, "rename", &e);
            Error::Filesystem {
                from: from.to_path_buf(),
                to: to.clone(),
                reason: e.to_string(),
            }
        })?;

        log_fs_modification("rename", from, Some(&format!("-> {}", new_name)));
        Ok(to)
    }
}
