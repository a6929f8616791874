//! # Theme Preference
//!
//! Light is the default and is represented by the *absence* of a stored
//! preference. Dark is stored as the literal string `dark` in a single file
//! (`~/.parley/theme` by default). No versioning, no migration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

/// Stored value that marks the dark theme as active.
pub const DARK_MARKER: &str = "dark";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemePreference::Dark
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

/// Durable storage for the theme preference.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.parley/theme`, or `None` if there is no home directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".parley").join("theme"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored preference. Anything other than the dark marker,
    /// including a missing or unreadable file, means light.
    pub fn load(&self) -> ThemePreference {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim() == DARK_MARKER => {
                debug!("Loaded dark theme preference from {}", self.path.display());
                ThemePreference::Dark
            }
            Ok(_) => ThemePreference::Light,
            Err(e) if e.kind() == io::ErrorKind::NotFound => ThemePreference::Light,
            Err(e) => {
                warn!(
                    "Failed to read theme preference {}: {}",
                    self.path.display(),
                    e
                );
                ThemePreference::Light
            }
        }
    }

    /// Persist `dark`, or clear the stored value for light.
    pub fn save(&self, preference: ThemePreference) -> io::Result<()> {
        match preference {
            ThemePreference::Dark => {
                if let Some(parent) = self.path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&self.path, DARK_MARKER)?;
            }
            ThemePreference::Light => match fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            },
        }
        info!("Theme preference set to {}", preference.label());
        Ok(())
    }
}
