//! Light/dark theme preference.
use std::{fmt, str::FromStr};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{KeyValueStore, NotesError, Presentation, Result, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(NotesError::InvalidTheme {
                value: other.to_string(),
            }),
        }
    }
}

/// The persisted theme flag and what is currently applied.
pub struct ThemePreference<S> {
    adapter: S,
    current: Option<Theme>,
}

impl<S: KeyValueStore> ThemePreference<S> {
    pub fn new(adapter: S) -> Self {
        ThemePreference {
            adapter,
            current: None,
        }
    }

    /// The applied theme; `None` means the surface default.
    pub fn current(&self) -> Option<Theme> {
        self.current
    }

    /// Applies the stored theme, if any. Unreadable or unknown values leave
    /// the surface default in place.
    pub fn apply_saved(&mut self, surface: &mut impl Presentation) {
        let saved = match self.adapter.get(THEME_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved theme, keeping the default");
                return;
            }
            Err(e) => {
                warn!("Failed to read saved theme: {}", e);
                return;
            }
        };

        match saved.parse::<Theme>() {
            Ok(theme) => {
                debug!("Applying saved theme: {}", theme);
                self.current = Some(theme);
                surface.apply_theme(theme);
            }
            Err(e) => warn!("Ignoring saved theme: {}", e),
        }
    }

    /// Switches dark to light and anything else to dark, applies the result
    /// and stores it. The theme stays applied even if storing fails.
    pub fn toggle(&mut self, surface: &mut impl Presentation) -> Result<Theme> {
        let next = match self.current {
            Some(Theme::Dark) => Theme::Light,
            _ => Theme::Dark,
        };
        self.current = Some(next);
        surface.apply_theme(next);
        info!("Theme switched to {}", next);

        self.adapter.set(THEME_KEY, next.as_str())?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EditorMode, MemoryStore, Note, NoteForm};

    #[derive(Default)]
    struct ThemeOnly {
        applied: Vec<Theme>,
    }

    impl Presentation for ThemeOnly {
        fn render(&mut self, _notes: &[&Note]) {}
        fn show_editor(&mut self, _mode: EditorMode, _form: &NoteForm) {}
        fn hide_editor(&mut self) {}
        fn warn(&mut self, _message: &str) {}
        fn confirm(&mut self, _question: &str) -> bool {
            false
        }
        fn apply_theme(&mut self, theme: Theme) {
            self.applied.push(theme);
        }
    }

    #[test]
    fn test_toggle_from_default_goes_dark_then_light() {
        let memory = MemoryStore::new();
        let mut surface = ThemeOnly::default();
        let mut theme = ThemePreference::new(memory.clone());
        theme.apply_saved(&mut surface);
        assert_eq!(theme.current(), None);

        assert_eq!(theme.toggle(&mut surface).unwrap(), Theme::Dark);
        assert_eq!(memory.raw(THEME_KEY).as_deref(), Some("dark"));

        assert_eq!(theme.toggle(&mut surface).unwrap(), Theme::Light);
        assert_eq!(memory.raw(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(surface.applied, vec![Theme::Dark, Theme::Light]);
    }

    #[test]
    fn test_apply_saved_uses_stored_value() {
        let memory = MemoryStore::new();
        memory.insert_raw(THEME_KEY, "dark");
        let mut surface = ThemeOnly::default();
        let mut theme = ThemePreference::new(memory);

        theme.apply_saved(&mut surface);
        assert_eq!(theme.current(), Some(Theme::Dark));
        assert_eq!(surface.applied, vec![Theme::Dark]);

        assert_eq!(theme.toggle(&mut surface).unwrap(), Theme::Light);
    }

    #[test]
    fn test_unknown_saved_value_is_ignored() {
        let memory = MemoryStore::new();
        memory.insert_raw(THEME_KEY, "solarized");
        let mut surface = ThemeOnly::default();
        let mut theme = ThemePreference::new(memory);

        theme.apply_saved(&mut surface);
        assert_eq!(theme.current(), None);
        assert!(surface.applied.is_empty());
    }

    #[test]
    fn test_toggle_keeps_theme_when_store_fails() {
        let memory = MemoryStore::new();
        memory.fail_writes(true);
        let mut surface = ThemeOnly::default();
        let mut theme = ThemePreference::new(memory.clone());

        assert!(matches!(
            theme.toggle(&mut surface),
            Err(NotesError::Persistence { .. })
        ));
        assert_eq!(theme.current(), Some(Theme::Dark));
        assert_eq!(surface.applied, vec![Theme::Dark]);
        assert_eq!(memory.raw(THEME_KEY), None);
    }
}
