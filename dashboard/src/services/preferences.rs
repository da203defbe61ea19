//! Theme preference, persisted under its own key next to the credentials.

use std::sync::Arc;

use tracing::warn;

use super::storage::KeyValueStore;

/// Persistent key for the theme preference.
pub const THEME_KEY: &str = "partner-dashboard.theme";

/// Dashboard color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
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

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme `{other}`")),
        }
    }
}

/// UI preferences backed by the local store.
pub struct Preferences {
    backend: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Stored theme, or the default when unset or unreadable.
    pub fn theme(&self) -> Theme {
        match self.backend.get(THEME_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "Ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "Theme preference unavailable");
                Theme::default()
            }
        }
    }

    /// Persist the theme; failures are logged, the UI keeps working.
    pub fn set_theme(&self, theme: Theme) {
        if let Err(e) = self.backend.set(THEME_KEY, theme.as_str()) {
            warn!(error = %e, theme = theme.as_str(), "Failed to persist theme");
        }
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::credentials::CREDENTIALS_KEY;
    use crate::services::storage::MemoryStore;

    #[test]
    fn test_theme_defaults_and_persists() {
        let backend = Arc::new(MemoryStore::new());
        let prefs = Preferences::new(backend.clone());
        assert_eq!(prefs.theme(), Theme::Light);

        prefs.set_theme(Theme::Dark);
        assert_eq!(prefs.theme(), Theme::Dark);
        assert_eq!(backend.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(backend.get(CREDENTIALS_KEY).unwrap(), None);
    }

    #[test]
    fn test_garbage_theme_falls_back() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(THEME_KEY, "neon").unwrap();
        assert_eq!(Preferences::new(backend).theme(), Theme::Light);
    }
}
