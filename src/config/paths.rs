//! Path resolution for datefixer configuration files.
//!
//! datefixer keeps its own files in `~/.datefixer/`:
//! - `config.yaml` - Main configuration file
//!
//! Chat databases are never stored here; they are chosen at run time.

use std::path::PathBuf;

use crate::error::DateFixerError;

/// Paths to datefixer configuration files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.datefixer/`
    pub root: PathBuf,
    /// Config file: `~/.datefixer/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, DateFixerError> {
        let home = std::env::var("HOME").map_err(|_| {
            DateFixerError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".datefixer")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), DateFixerError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                DateFixerError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".datefixer"))
        })
    }
}
