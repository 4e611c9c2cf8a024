//! Path resolution for stretch925 configuration and data files.
//!
//! All stretch925 data is stored in `~/.stretch925/`:
//! - `config.yaml` - Main configuration file
//! - `logs/` - Log files (the TUI owns the terminal, so logs go here)

use std::path::PathBuf;

use crate::error::Stretch925Error;

/// Paths to stretch925 configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.stretch925/`
    pub root: PathBuf,
    /// Config file: `~/.stretch925/config.yaml`
    pub config_file: PathBuf,
    /// Logs directory: `~/.stretch925/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, Stretch925Error> {
        let home = std::env::var("HOME").map_err(|_| {
            Stretch925Error::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".stretch925")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), Stretch925Error> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    Stretch925Error::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".stretch925")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-stretch925");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.logs, root.join("logs"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.logs.exists());
    }
}
