//! Theme preference persisted in client-local state
//!
//! A single `theme` key in `<state_dir>/theme.toml`. Independent of the
//! request flows: nothing in the coordinator reads it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::Result;

const THEME_FILE: &str = "theme.toml";

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: Theme,
}

/// Reads and writes the persisted theme
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(THEME_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme, or `Light` when nothing usable is stored
    pub fn load(&self) -> Theme {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => {
                debug!("No stored theme at {}, using light", self.path.display());
                return Theme::default();
            }
        };
        match toml::from_str::<ThemeFile>(&content) {
            Ok(file) => file.theme,
            Err(e) => {
                warn!("Ignoring unreadable theme file {}: {}", self.path.display(), e);
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(&ThemeFile { theme })?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Flip the stored theme and return the new value
    pub fn toggle(&self) -> Result<Theme> {
        let next = self.load().toggled();
        self.save(next)?;
        Ok(next)
    }
}
