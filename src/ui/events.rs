//! Application event handling.
//!
//! Applies completions from background tasks (article loads, exports) to
//! the application state.

use crate::app::{App, AppEvent, LoadOutcome};

/// Handle one event from a background task.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::ArticlesLoaded { generation, result } => {
            if app.apply_load(generation, result) == LoadOutcome::Failed {
                app.set_status("Load failed");
            }
        }
        AppEvent::ExportComplete { path } => {
            app.set_status(format!("Exported {}", path.display()));
        }
        AppEvent::ExportFailed { error } => {
            tracing::error!(error = %error, "Export failed");
            app.set_status(format!("Export failed: {}", error));
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.set_status(format!("Internal error in {} task", task));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::{Article, LOAD_FAILED_MESSAGE};
    use crate::preferences::Preferences;
    use crate::storage::Database;
    use crate::view::{grid_view, GridView};
    use std::path::PathBuf;

    async fn test_app() -> App {
        let db = Database::open(":memory:").await.unwrap();
        App::new(db, Config::default(), Preferences::default()).unwrap()
    }

    fn status(app: &App) -> &str {
        app.status_message
            .as_ref()
            .map(|(m, _)| m.as_ref())
            .unwrap_or("")
    }

    fn headlines(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                title: format!("Headline {}", i),
                summary: Some("No summary available".to_string()),
                link: format!("https://example.com/{}", i),
                image: None,
                published: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_loaded_event_applies() {
        let mut app = test_app().await;
        let generation = app.start_load();
        handle_app_event(
            &mut app,
            AppEvent::ArticlesLoaded {
                generation,
                result: Ok(headlines(7)),
            },
        );
        assert_eq!(app.feed.articles().len(), 7);
        assert_eq!(status(&app), "Loaded 7 articles");
    }

    #[tokio::test]
    async fn test_failed_event_shows_notice() {
        let mut app = test_app().await;
        let generation = app.start_load();
        handle_app_event(
            &mut app,
            AppEvent::ArticlesLoaded {
                generation,
                result: Err("HTTP 500".to_string()),
            },
        );
        assert_eq!(grid_view(&app.feed), GridView::Notice(LOAD_FAILED_MESSAGE));
        assert_eq!(status(&app), "Load failed");
    }

    #[tokio::test]
    async fn test_stale_event_ignored() {
        let mut app = test_app().await;
        let stale = app.start_load();
        app.start_load();
        handle_app_event(
            &mut app,
            AppEvent::ArticlesLoaded {
                generation: stale,
                result: Err("timeout".to_string()),
            },
        );
        assert!(app.feed.notice().is_none());
        assert!(app.loading);
    }

    #[tokio::test]
    async fn test_export_events_set_status() {
        let mut app = test_app().await;
        handle_app_event(
            &mut app,
            AppEvent::ExportComplete {
                path: PathBuf::from("/tmp/Daily-AI-Newspaper-2026-10-19.html"),
            },
        );
        assert_eq!(
            status(&app),
            "Exported /tmp/Daily-AI-Newspaper-2026-10-19.html"
        );

        handle_app_event(
            &mut app,
            AppEvent::ExportFailed {
                error: "Export directory does not exist: /nope".to_string(),
            },
        );
        assert!(status(&app).starts_with("Export failed"));
    }
}
