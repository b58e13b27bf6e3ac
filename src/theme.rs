//! Dark/light preference, persisted across sessions.
//!
//! The preference only selects the terminal palette; it has no effect on
//! search behavior.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use colored::Color;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

/// Colors used by the terminal surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub badge: Color,
    pub muted: Color,
    pub info: Color,
    pub error: Color,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                accent: Color::BrightCyan,
                badge: Color::BrightMagenta,
                muted: Color::BrightBlack,
                info: Color::BrightYellow,
                error: Color::BrightRed,
            },
            Theme::Light => Palette {
                accent: Color::Blue,
                badge: Color::Magenta,
                muted: Color::Black,
                info: Color::Yellow,
                error: Color::Red,
            },
        }
    }
}

/// File-backed theme preference. Without a path nothing is persisted.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: Option<PathBuf>,
}

impl ThemeStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// `DOC_LOCATOR_THEME_FILE`, else `<config dir>/doc-locator/theme`.
    pub fn from_env() -> Self {
        let path = finder_client::error_handler::env_opt("DOC_LOCATOR_THEME_FILE")
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|d| d.join("doc-locator").join("theme")));
        Self::new(path)
    }

    /// Stored theme, or the default if nothing usable is stored.
    pub fn load(&self) -> Theme {
        let Some(path) = &self.path else {
            return Theme::default();
        };
        match fs::read_to_string(path) {
            Ok(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                warn!(path = %path.display(), "ignoring unrecognized theme preference");
                Theme::default()
            }),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no stored theme");
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(path, theme.as_str()).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Flips `current` and persists the result.
    ///
    /// The returned theme is in effect even when it could not be saved.
    pub fn toggle(&self, current: Theme) -> Theme {
        let next = current.toggled();
        if let Err(e) = self.save(next) {
            warn!(error = %e, "could not persist theme");
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::new(Some(dir.path().join("nested").join("theme")));

        assert_eq!(store.load(), Theme::Light);
        assert_eq!(store.toggle(store.load()), Theme::Dark);
        assert_eq!(store.load(), Theme::Dark);
        assert_eq!(store.toggle(Theme::Dark), Theme::Light);
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn garbage_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme");
        fs::write(&path, "neon").unwrap();
        assert_eq!(ThemeStore::new(Some(path)).load(), Theme::Light);
    }

    #[test]
    fn pathless_store_still_alternates() {
        let store = ThemeStore::new(None);
        let first = store.toggle(store.load());
        let second = store.toggle(first);
        assert_eq!(first, Theme::Dark);
        assert_eq!(second, Theme::Light);
        assert_eq!(store.load(), Theme::Light);
    }

    #[test]
    fn unwritable_store_still_alternates() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let store = ThemeStore::new(Some(blocker.join("theme")));

        let first = store.toggle(Theme::Light);
        assert_eq!(first, Theme::Dark);
        assert_eq!(store.toggle(first), Theme::Light);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Theme::parse(" LIGHT\n"), Some(Theme::Light));
        assert_ne!(Theme::Dark.palette(), Theme::Light.palette());
    }
}
