use clap::{Parser, Subcommand};
use image_sorter_core::logging::init_logger;
use image_sorter_core::{Config, ImageSorter, LogLevel, RunState};
use log::{error, info, warn};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image-sorter")]
#[command(about = "Rename a folder of images so alphabetical order follows resolution, brightness or colour")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Folder of images to rename
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Run-state file holding the toggle and the sort mode
    #[arg(long)]
    state: Option<PathBuf>,

    /// Run without making changes
    #[arg(long)]
    dry_run: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "image-sorter.json")]
        path: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    if let Some(Commands::GenerateConfig { path }) = cli.command {
        let config = Config::default();
        config.save_to_file(&path)?;
        println!("Configuration file generated at: {}", path.display());
        return Ok(());
    }

    // Set up configuration
    let mut config = match &cli.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::default(),
    };

    // Override config with command line arguments
    if let Some(dir) = cli.dir {
        config.image_dir = dir;
    }
    if let Some(state) = cli.state {
        config.state_file = state;
    }
    config.dry_run |= cli.dry_run;
    config.log_level = match cli.verbose {
        0 => config.log_level,
        1 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };

    config.validate()?;

    // Initialize logger, falling back to the console
    if let Err(e) = init_logger(&config.log_dir, config.log_level.into()) {
        env_logger::Builder::new()
            .filter_level(config.log_level.into())
            .init();
        warn!("File logging unavailable: {}", e);
    }

    println!("Working");

    let mut state = RunState::load_or_create(&config.state_file)?;
    let mode = state.mode();
    let prefix = state.advance();
    if !config.dry_run {
        state.save(&config.state_file)?;
    }

    if !config.image_dir.exists() {
        info!("Creating image directory {}", config.image_dir.display());
        std::fs::create_dir_all(&config.image_dir)?;
    }

    info!("Sorting {} by {}", config.image_dir.display(), mode);
    let sorter = ImageSorter::new(config);
    let summary = sorter.run(mode, prefix)?;

    for failure in summary
        .staging_failures
        .iter()
        .chain(&summary.decode_failures)
        .chain(&summary.rename_failures)
    {
        error!("{}: {}", failure.path.display(), failure.error);
    }

    println!("{}", summary);
    Ok(())
}
