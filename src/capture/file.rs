//! Output location for screenshots.

use std::fs::{self, DirBuilder};
use std::io;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use super::types::CaptureError;
use crate::config::{Config, PICTURES_SUBDIR};

/// Mode for a freshly created pictures directory (owner rwx).
pub const PICTURES_DIR_MODE: u32 = 0o700;

/// Timestamp layout embedded in filenames. Sorts lexically by time.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Destination of a single screenshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPath {
    pub directory: PathBuf,
    pub filename: String,
}

impl OutputPath {
    pub fn full_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

/// Resolve `<home>/Pictures`, creating it if it does not exist yet.
///
/// An existing directory is returned as-is; its permissions are not touched.
pub fn resolve_pictures_dir(home: &Path) -> Result<PathBuf, CaptureError> {
    let home = std::path::absolute(home).map_err(|source| CaptureError::CreateDirectory {
        path: home.to_path_buf(),
        source,
    })?;
    let directory = home.join(PICTURES_SUBDIR);
    ensure_directory_exists(&directory)?;
    Ok(directory)
}

/// Create `directory` (non-recursively) with [`PICTURES_DIR_MODE`] unless it already exists.
pub fn ensure_directory_exists(directory: &Path) -> Result<(), CaptureError> {
    if directory.is_dir() {
        return Ok(());
    }

    log::info!("Creating screenshot directory: {}", directory.display());
    match DirBuilder::new().mode(PICTURES_DIR_MODE).create(directory) {
        Ok(()) => Ok(()),
        // Lost a race with another process; fine as long as it is a directory.
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            if fs::metadata(directory).is_ok_and(|meta| meta.is_dir()) {
                Ok(())
            } else {
                Err(CaptureError::NotADirectory(directory.to_path_buf()))
            }
        }
        Err(source) => Err(CaptureError::CreateDirectory {
            path: directory.to_path_buf(),
            source,
        }),
    }
}

/// Generate `<prefix>_YYYYMMDD_HHMMSS.<extension>` from the local wall clock.
pub fn generate_filename(prefix: &str, extension: &str) -> String {
    filename_for(prefix, extension, &Local::now())
}

/// Same as [`generate_filename`] for a fixed point in time.
pub fn filename_for<Tz>(prefix: &str, extension: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_{}.{}",
        prefix,
        timestamp.format(TIMESTAMP_FORMAT),
        extension
    )
}

/// Ensure the pictures directory and pick a filename for this run.
pub fn resolve_output_path(config: &Config) -> Result<OutputPath, CaptureError> {
    let directory = resolve_pictures_dir(config.home_dir())?;
    let filename = generate_filename(&config.filename_prefix, &config.extension);
    log::debug!("Output path resolved: {}/{}", directory.display(), filename);
    Ok(OutputPath {
        directory,
        filename,
    })
}
