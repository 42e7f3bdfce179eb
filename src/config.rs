//! Runtime settings for a capture run.
//!
//! eagleshot has no configuration file. Everything here is either a fixed
//! default or derived from the environment (`HOME`).

use std::env;
use std::path::{Path, PathBuf};

use crate::capture::CaptureError;

/// Subdirectory of the home directory that receives screenshots.
pub const PICTURES_SUBDIR: &str = "Pictures";
/// Prefix of generated screenshot filenames.
pub const DEFAULT_PREFIX: &str = "scr";
/// Extension of generated screenshot filenames.
pub const DEFAULT_EXTENSION: &str = "png";
/// Interactive region selection tool.
pub const DEFAULT_SELECTOR: &str = "slurp";
/// Screenshot tool that writes a region to a file.
pub const DEFAULT_CAPTURER: &str = "grim";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// User home directory; screenshots go to `<home>/Pictures`.
    pub home_dir: PathBuf,
    pub filename_prefix: String,
    pub extension: String,
    /// Program name or path of the region selector, resolved through `PATH`.
    pub selector_program: String,
    /// Program name or path of the capture tool, resolved through `PATH`.
    pub capture_program: String,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Fails with [`CaptureError::MissingHome`] if `HOME` is unset or empty.
    pub fn from_env() -> Result<Self, CaptureError> {
        let home = env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .ok_or(CaptureError::MissingHome)?;
        Ok(Self::with_home(home))
    }

    pub fn with_home(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
            filename_prefix: DEFAULT_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            selector_program: DEFAULT_SELECTOR.to_string(),
            capture_program: DEFAULT_CAPTURER.to_string(),
        }
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    /// `<home>/Pictures`, not yet checked or created.
    pub fn pictures_dir(&self) -> PathBuf {
        self.home_dir.join(PICTURES_SUBDIR)
    }
}
