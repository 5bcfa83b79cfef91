//! The run-state file.
//!
//! A small text file that survives between runs. Lines starting with `#` are
//! comments. The first remaining line is a toggle flipped on every run, the
//! second names the sort mode:
//!
//! ```text
//! # comment
//! false
//! color
//! ```
//!
//! The toggle decides whether this run's staging names carry an `X` prefix, so
//! leftovers from an interrupted run never share a name with fresh ones.

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::SortMode;

/// Prefix added to every generated name when the toggle reads `true`
pub const TOGGLE_PREFIX: &str = "X";

const DEFAULT_STATE: &str = "\
# image-sorter run state
#
# First setting: flipped automatically on every run. Do not edit.
false
# Second setting: how to order the folder, one of resolution, brightness, color
resolution
";

/// Parsed run-state file
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    toggle: bool,
    mode: SortMode,
    /// Every line of the file, comments included, so saving preserves them
    lines: Vec<String>,
    toggle_line: usize,
}

impl RunState {
    /// Parse run-state text
    pub fn parse(contents: &str) -> Result<Self> {
        let lines: Vec<String> = contents.lines().map(str::to_string).collect();

        let mut settings = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.starts_with('#') && !line.trim().is_empty());

        let (toggle_line, toggle_text) = settings.next().ok_or_else(|| {
            Error::Configuration("Run-state file is missing the toggle line".to_string())
        })?;
        let toggle = match toggle_text.trim() {
            "true" => true,
            "false" => false,
            other => {
                return Err(Error::Configuration(format!(
                    "Run-state toggle must be true or false, found '{}'",
                    other
                )))
            }
        };

        let (_, mode_text) = settings.next().ok_or_else(|| {
            Error::Configuration("Run-state file is missing the mode line".to_string())
        })?;
        let mode = mode_text.parse()?;

        Ok(Self {
            toggle,
            mode,
            lines,
            toggle_line,
        })
    }

    /// Read the run-state file, writing the default one first if it is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Creating run-state file at {}", path.display());
            fs::write(path, DEFAULT_STATE)?;
        } else {
            info!("Found run-state file at {}", path.display());
        }

        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn toggle(&self) -> bool {
        self.toggle
    }

    /// Prefix this run's names should carry, flipping the toggle for the next run
    pub fn advance(&mut self) -> &'static str {
        let prefix = if self.toggle { TOGGLE_PREFIX } else { "" };
        self.toggle = !self.toggle;
        self.lines[self.toggle_line] = self.toggle.to_string();
        debug!("Run-state toggle is now {}", self.toggle);
        prefix
    }

    /// Render the file contents
    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Write the run-state back, keeping comment lines intact
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_skips_comments() {
        let state = RunState::parse("# header\n# more\ntrue\n# mode\ncolor\n").unwrap();
        assert!(state.toggle());
        assert_eq!(state.mode(), SortMode::Color);
    }

    #[test]
    fn test_advance_alternates_prefix() {
        let mut state = RunState::parse("false\nbrightness\n").unwrap();
        assert_eq!(state.advance(), "");
        assert!(state.toggle());
        assert_eq!(state.advance(), TOGGLE_PREFIX);
        assert!(!state.toggle());
    }

    #[test]
    fn test_render_preserves_comments() {
        let mut state = RunState::parse("# keep me\nfalse\n# and me\nresolution\n").unwrap();
        state.advance();
        assert_eq!(state.render(), "# keep me\ntrue\n# and me\nresolution\n");
    }

    #[test]
    fn test_missing_lines_are_configuration_errors() {
        assert!(matches!(
            RunState::parse("# nothing here\n"),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            RunState::parse("true\n"),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            RunState::parse("maybe\ncolor\n"),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            RunState::parse("true\nsize\n"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("options.txt");

        let mut state = RunState::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(state.mode(), SortMode::Resolution);
        assert_eq!(state.advance(), "");
        state.save(&path).unwrap();

        let mut reloaded = RunState::load_or_create(&path).unwrap();
        assert!(reloaded.toggle());
        assert_eq!(reloaded.advance(), TOGGLE_PREFIX);
        assert!(fs::read_to_string(&path)
            .unwrap()
            .starts_with("# image-sorter run state"));
    }
}
