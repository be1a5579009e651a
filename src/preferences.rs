//! Persisted display preferences.
//!
//! The display mode lives in the `user_preferences` table under key `dark`:
//! `"1"` means dark, any other value (or no row) means normal. It is read
//! once at startup and written immediately on every toggle.
use anyhow::Result;

use crate::storage::Database;

// ============================================================================
// DisplayMode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Normal,
    Dark,
}

impl DisplayMode {
    pub fn is_dark(self) -> bool {
        self == DisplayMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Normal => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Normal,
        }
    }

    fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("1") => DisplayMode::Dark,
            _ => DisplayMode::Normal,
        }
    }

    fn stored_value(self) -> &'static str {
        match self {
            DisplayMode::Dark => "1",
            DisplayMode::Normal => "0",
        }
    }
}

// ============================================================================
// Preferences
// ============================================================================

/// In-memory copy of the persisted preferences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preferences {
    mode: DisplayMode,
}

impl Preferences {
    pub const DARK_KEY: &'static str = "dark";

    /// Read the stored display mode.
    pub async fn load(db: &Database) -> Result<Self> {
        let stored = db.get_preference(Self::DARK_KEY).await?;
        let mode = DisplayMode::from_stored(stored.as_deref());
        tracing::debug!(?mode, "Loaded display preference");
        Ok(Self { mode })
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Flip the display mode and persist it before returning.
    ///
    /// The in-memory mode only changes once the write succeeded.
    pub async fn toggle(&mut self, db: &Database) -> Result<DisplayMode> {
        let next = self.mode.toggled();
        db.set_preference(Self::DARK_KEY, next.stored_value())
            .await?;
        self.mode = next;
        tracing::info!(mode = ?next, "Display mode toggled");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[test]
    fn test_stored_values() {
        assert_eq!(DisplayMode::from_stored(Some("1")), DisplayMode::Dark);
        assert_eq!(DisplayMode::from_stored(Some("0")), DisplayMode::Normal);
        assert_eq!(DisplayMode::from_stored(Some("true")), DisplayMode::Normal);
        assert_eq!(DisplayMode::from_stored(None), DisplayMode::Normal);
    }

    #[tokio::test]
    async fn test_load_absent_is_normal() {
        let db = test_db().await;
        let prefs = Preferences::load(&db).await.unwrap();
        assert_eq!(prefs.mode(), DisplayMode::Normal);
    }

    #[tokio::test]
    async fn test_toggle_persists_immediately() {
        let db = test_db().await;
        let mut prefs = Preferences::load(&db).await.unwrap();

        assert_eq!(prefs.toggle(&db).await.unwrap(), DisplayMode::Dark);
        assert_eq!(
            db.get_preference(Preferences::DARK_KEY).await.unwrap().as_deref(),
            Some("1")
        );

        assert_eq!(prefs.toggle(&db).await.unwrap(), DisplayMode::Normal);
        assert_eq!(
            db.get_preference(Preferences::DARK_KEY).await.unwrap().as_deref(),
            Some("0")
        );
    }

    #[tokio::test]
    async fn test_toggle_restored_on_next_load() {
        let db = test_db().await;
        let mut prefs = Preferences::load(&db).await.unwrap();
        prefs.toggle(&db).await.unwrap();

        let reloaded = Preferences::load(&db).await.unwrap();
        assert!(reloaded.mode().is_dark());
    }

    #[tokio::test]
    async fn test_unexpected_stored_value_is_normal() {
        let db = test_db().await;
        db.set_preference(Preferences::DARK_KEY, "yes").await.unwrap();
        let prefs = Preferences::load(&db).await.unwrap();
        assert_eq!(prefs.mode(), DisplayMode::Normal);
    }
}
