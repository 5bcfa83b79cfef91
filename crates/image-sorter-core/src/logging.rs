use log::{error, info, LevelFilter};
use std::path::Path;

// For file-based logging with rotation
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;

/// Initialize the logger with timestamp, log level, and module path.
///
/// Everything at `level` goes to a rotating file in `log_dir`; only warnings
/// and errors reach the console so they don't fight with the progress bar.
pub fn init_logger(log_dir: &Path, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;

    let log_file_path = log_dir.join("image-sorter.log");
    let archived_logs_pattern = format!("{}/image-sorter.{{}}.log", log_dir.display());

    // Rotate at 10MB
    let file_trigger = SizeTrigger::new(10 * 1024 * 1024);

    // Keep 5 archived log files
    let file_roller = FixedWindowRoller::builder()
        .build(&archived_logs_pattern, 5)
        .map_err(|e| format!("Failed to create log roller: {}", e))?;

    let compound_policy = CompoundPolicy::new(Box::new(file_trigger), Box::new(file_roller));

    let rolling_file = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] [{M}:{L}] - {m}{n}",
        )))
        .build(log_file_path.clone(), Box::new(compound_policy))
        .map_err(|e| format!("Failed to create log appender: {}", e))?;

    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{l}] {m}{n}")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(rolling_file)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Warn)))
                .build("console", Box::new(console)),
        )
        .build(
            Root::builder()
                .appender("file")
                .appender("console")
                .build(level),
        )
        .map_err(|e| format!("Failed to build log config: {}", e))?;

    log4rs::init_config(config).map_err(|e| format!("Failed to initialize log4rs: {}", e))?;

    // Environment override, e.g. IMAGE_SORTER_LOG=debug
    if let Ok(env_filter) = std::env::var("IMAGE_SORTER_LOG") {
        if let Ok(level) = env_filter.parse::<LevelFilter>() {
            log::set_max_level(level);
        }
    }

    info!("Image sorter started");
    info!("Logging to file: {}", log_file_path.display());
    Ok(())
}

/// Log file operation that failed
pub fn log_file_error(path: &Path, operation: &str, error: &dyn std::error::Error) {
    error!(
        "File operation failed - Operation: {}, Path: {}, Error: {}",
        operation,
        path.display(),
        error
    );
}

/// Log file system modification
pub fn log_fs_modification(operation: &str, path: &Path, details: Option<&str>) {
    let details_str = details.unwrap_or("");
    info!(
        "FS CHANGE - Operation: {}, Path: {}{}",
        operation,
        path.display(),
        if details_str.is_empty() {
            "".to_string()
        } else {
            format!(", Details: {}", details_str)
        }
    );
}
