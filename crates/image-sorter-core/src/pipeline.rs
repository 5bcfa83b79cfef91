//! The stages of one sorting run: staging, decoding and renaming.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{error, info, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::config::Config;
use crate::discovery::DiscoveryContext;
use crate::error::{Error, Result};
use crate::naming;
use crate::processing::{build_tour, record_distance, record_from_file};
use crate::safety::SafetyManager;
use crate::types::{ImageFile, ImageId, ImageRecord, SortMode};

/// A discovered file with its id, at its current location
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    pub id: ImageId,
    pub path: PathBuf,
}

/// A per-file failure that did not stop the run
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of a run
#[derive(Debug)]
pub struct RunSummary {
    pub mode: SortMode,
    pub discovered: usize,
    pub renamed: usize,
    pub staging_failures: Vec<FileFailure>,
    pub decode_failures: Vec<FileFailure>,
    pub rename_failures: Vec<FileFailure>,
}

impl RunSummary {
    pub fn new(mode: SortMode) -> Self {
        Self {
            mode,
            discovered: 0,
            renamed: 0,
            staging_failures: Vec::new(),
            decode_failures: Vec::new(),
            rename_failures: Vec::new(),
        }
    }

    pub fn failures(&self) -> usize {
        self.staging_failures.len() + self.decode_failures.len() + self.rename_failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mode: {} discovered, {} renamed, {} unreadable, {} rename failures",
            self.mode,
            self.discovered,
            self.renamed,
            self.decode_failures.len(),
            self.rename_failures.len() + self.staging_failures.len()
        )
    }
}

/// Assign ids in discovery order and move each file to its staging name.
///
/// A file that cannot be staged keeps its original path and is still sorted.
pub fn stage_files(
    files: &[ImageFile],
    prefix: &str,
    stage: bool,
    context: &mut DiscoveryContext,
    safety: &SafetyManager,
    summary: &mut RunSummary,
) -> Vec<StagedFile> {
    let mut staged = Vec::with_capacity(files.len());

    for file in files {
        let id = context.assign_id();
        let mut path = file.path.clone();

        if stage {
            let name = naming::staging_name(prefix, id, &file.extension());
            match safety.rename(&file.path, &name) {
                Ok(new_path) => path = new_path,
                Err(e) => {
                    warn!("Could not stage {}: {}", file.path.display(), e);
                    summary.staging_failures.push(FileFailure {
                        path: file.path.clone(),
                        error: e,
                    });
                }
            }
        }

        staged.push(StagedFile { id, path });
    }

    staged
}

/// Decode every staged file, in parallel, keeping discovery order
pub fn decode_files(staged: &[StagedFile], config: &Config) -> Result<Vec<Result<ImageRecord>>> {
    let progress_bar = ProgressBar::new(staged.len() as u64);
    if config.show_progress {
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{eta}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
        {
            progress_bar.set_style(style.progress_chars("##-"));
        }
        progress_bar.set_message("Reading colours...");
    } else {
        progress_bar.set_draw_target(ProgressDrawTarget::hidden());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads())
        .build()
        .map_err(|e| Error::Configuration(format!("Failed to build thread pool: {}", e)))?;

    let results = pool.install(|| {
        staged
            .par_iter()
            .map(|file| {
                let result = record_from_file(&file.path, file.id);
                if file.id.0 % 10 == 0 {
                    info!("Working on {}", file.path.display());
                }
                progress_bar.inc(1);
                result
            })
            .collect::<Vec<_>>()
    });

    progress_bar.finish_with_message("Done reading");
    Ok(results)
}

/// Give one record its final name
fn apply_rename(
    record: &ImageRecord,
    name: &str,
    safety: &SafetyManager,
    summary: &mut RunSummary,
) {
    match safety.rename(&record.source_path, name) {
        Ok(_) => summary.renamed += 1,
        Err(e) => {
            error!("Failed to rename {}: {}", record.source_path.display(), e);
            summary.rename_failures.push(FileFailure {
                path: record.source_path.clone(),
                error: e,
            });
        }
    }
}

/// Final name for modes that need no global view. `None` for colour mode.
pub fn immediate_name(mode: SortMode, prefix: &str, record: &ImageRecord) -> Option<String> {
    match mode {
        SortMode::Resolution => Some(naming::resolution_name(prefix, record)),
        SortMode::Brightness => Some(naming::brightness_name(prefix, record)),
        SortMode::Color => None,
    }
}

/// Rename a record right away if the mode allows it
pub fn rename_immediately(
    mode: SortMode,
    prefix: &str,
    record: &ImageRecord,
    safety: &SafetyManager,
    summary: &mut RunSummary,
) {
    if let Some(name) = immediate_name(mode, prefix, record) {
        apply_rename(record, &name, safety, summary);
    }
}

/// Planned colour-mode names, in tour order
pub fn plan_color_names(records: &[ImageRecord], prefix: &str) -> Result<Vec<(ImageId, String)>> {
    let tour = build_tour(records)?;
    let by_id: HashMap<ImageId, &ImageRecord> = records.iter().map(|r| (r.id, r)).collect();

    let mut names = Vec::with_capacity(tour.len());
    let mut previous: Option<&ImageRecord> = None;

    for (position, id) in tour.ids().iter().enumerate() {
        let Some(record) = by_id.get(id).copied() else {
            continue;
        };
        let distance = previous.map_or(0.0, |p| record_distance(record, p));
        names.push((*id, naming::color_name(prefix, position, distance, record)));
        previous = Some(record);
    }

    Ok(names)
}

/// Rename every record by its place in the colour tour.
///
/// Zero records is a no-op.
pub fn rename_along_tour(
    records: &[ImageRecord],
    prefix: &str,
    safety: &SafetyManager,
    summary: &mut RunSummary,
) -> Result<()> {
    let names = match plan_color_names(records, prefix) {
        Ok(names) => names,
        Err(Error::EmptyInput) => {
            info!("No images to order by colour, nothing to do");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let by_id: HashMap<ImageId, &ImageRecord> = records.iter().map(|r| (r.id, r)).collect();
    for (id, name) in names {
        if let Some(record) = by_id.get(&id) {
            apply_rename(record, &name, safety, summary);
        }
    }

    Ok(())
}
