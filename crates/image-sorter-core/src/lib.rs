//! Core functionality for reordering a folder of images.
//!
//! Files are renamed so that plain alphabetical order follows a visual
//! criterion:
//! - resolution: pixel dimensions
//! - brightness: luma-weighted average intensity
//! - color: a nearest-neighbour tour through average RGB space

// -- External Dependencies --
use log::{info, warn};
use std::path::Path;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use pipeline::{FileFailure, RunSummary, StagedFile};
pub use state::RunState;
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod discovery;
pub mod logging;
pub mod naming;
pub mod pipeline;
pub mod processing;
pub mod safety;
pub mod state;
pub mod types;

use discovery::DiscoveryContext;

/// Main entry point for a sorting run
pub struct ImageSorter {
    config: Config,
    safety_manager: safety::SafetyManager,
}

impl ImageSorter {
    /// Create a new ImageSorter with the provided configuration
    pub fn new(config: Config) -> Self {
        let safety_manager = safety::SafetyManager::new(&config);
        Self {
            config,
            safety_manager,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Discover all images in the configured directory
    pub fn discover_images(&self) -> Result<Vec<ImageFile>> {
        discovery::discover_images(&self.config.image_dir)
    }

    /// Run the full pipeline over the configured directory.
    ///
    /// `prefix` is prepended to every generated name. Per-file failures are
    /// collected in the summary; only problems with the directory itself
    /// abort the run.
    pub fn run(&self, mode: SortMode, prefix: &str) -> Result<RunSummary> {
        self.run_in(&self.config.image_dir, mode, prefix)
    }

    /// Run the full pipeline over `directory`
    pub fn run_in(&self, directory: &Path, mode: SortMode, prefix: &str) -> Result<RunSummary> {
        let mut summary = RunSummary::new(mode);
        let mut context = DiscoveryContext::new();

        info!("Discovering images in {}...", directory.display());
        let files = discovery::discover_images(directory)?;
        summary.discovered = files.len();
        info!("Found {} images", files.len());

        let staged = pipeline::stage_files(
            &files,
            prefix,
            self.config.stage_files,
            &mut context,
            &self.safety_manager,
            &mut summary,
        );

        info!("Assigned {} ids, reading colour data...", context.assigned());
        let results = pipeline::decode_files(&staged, &self.config)?;

        for (file, result) in staged.iter().zip(results) {
            match result {
                Ok(record) => {
                    if mode.renames_immediately() {
                        pipeline::rename_immediately(
                            mode,
                            prefix,
                            &record,
                            &self.safety_manager,
                            &mut summary,
                        );
                    }
                    context.push(record);
                }
                Err(e) => {
                    warn!("Skipping {}: {}", file.path.display(), e);
                    summary.decode_failures.push(FileFailure {
                        path: file.path.clone(),
                        error: e,
                    });
                }
            }
        }

        if mode == SortMode::Color {
            info!("Ordering {} images by colour...", context.records().len());
            pipeline::rename_along_tour(
                context.records(),
                prefix,
                &self.safety_manager,
                &mut summary,
            )?;
        }

        info!("{}", summary);
        Ok(summary)
    }
}
