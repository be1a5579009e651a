use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export directory does not exist: {0}")]
    MissingDir(String),

    #[error("Failed to write edition: {0}")]
    Io(#[from] std::io::Error),
}

/// `Daily-AI-Newspaper-<YYYY-MM-DD>.html` for the given day.
pub fn edition_filename(date: NaiveDate) -> String {
    format!("Daily-AI-Newspaper-{}.html", date.format("%Y-%m-%d"))
}

/// Write `html` into `dir` under the dated edition filename.
///
/// An existing file for the same day is overwritten. Returns the full path
/// written.
pub async fn write_edition(dir: &Path, date: NaiveDate, html: &str) -> Result<PathBuf, ExportError> {
    if !dir.is_dir() {
        return Err(ExportError::MissingDir(dir.display().to_string()));
    }

    let path = dir.join(edition_filename(date));
    tokio::fs::write(&path, html).await?;
    tracing::info!(path = %path.display(), bytes = html.len(), "Edition exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(edition_filename(date), "Daily-AI-Newspaper-2026-03-07.html");
    }

    #[tokio::test]
    async fn test_write_edition_overwrites_same_day() {
        let dir = std::env::temp_dir().join("broadsheet_export_test");
        std::fs::create_dir_all(&dir).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let path = write_edition(&dir, date, "<p>first</p>").await.unwrap();
        write_edition(&dir, date, "<p>second</p>").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>second</p>");
        assert!(path.ends_with("Daily-AI-Newspaper-2026-10-19.html"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_write_edition_missing_dir() {
        let dir = std::env::temp_dir().join("broadsheet_export_missing_dir_test");
        std::fs::remove_dir_all(&dir).ok();
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let result = write_edition(&dir, date, "x").await;
        assert!(matches!(result, Err(ExportError::MissingDir(_))));
    }
}
