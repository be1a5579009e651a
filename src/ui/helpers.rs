//! Helper functions for UI operations.
//!
//! Background task spawning (article loads, exports) and the browser
//! actions that leave the terminal.

use crate::app::{App, AppEvent};
use crate::feed::fetch_articles;
use crate::render::write_edition;
use crate::util::validate_link;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// A panicking spawned task would otherwise vanish without the UI ever
/// hearing about it.
///
/// # Returns
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            }
        })
}

/// Issue a new load generation and fetch articles in the background.
///
/// Sends `AppEvent::ArticlesLoaded` tagged with the generation. A panic
/// inside the task is reported as a failed load for the same generation.
pub(super) fn spawn_load(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let generation = app.start_load();
    let client = app.http_client.clone();
    let api_url = app.config.api_url.clone();
    let limit = app.config.effective_limit();
    let tx = event_tx.clone();

    tracing::debug!(generation, api_url = %api_url, limit, "Spawning article load");

    tokio::spawn(async move {
        let tx_panic = tx.clone();
        match catch_task_panic(async {
            let result = fetch_articles(&client, &api_url, limit)
                .await
                .map_err(|e| e.to_string());
            if let Err(e) = tx
                .send(AppEvent::ArticlesLoaded { generation, result })
                .await
            {
                tracing::warn!(error = %e, event = "ArticlesLoaded", "Channel send failed (receiver dropped)");
            }
        })
        .await
        {
            Ok(()) => {}
            Err(panic_msg) => {
                tracing::error!(task = "load", generation, error = %panic_msg, "Background task panicked");
                let _ = tx_panic
                    .send(AppEvent::ArticlesLoaded {
                        generation,
                        result: Err(format!("load task panicked: {}", panic_msg)),
                    })
                    .await;
            }
        }
    });
}

/// Write the current edition to the export directory in the background.
///
/// The HTML is rendered now, so later navigation does not change what is
/// written.
pub(super) fn spawn_export(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    let html = app.edition_html();
    let dir = app.config.export_dir();
    let date = App::today();
    let tx = event_tx.clone();

    app.set_status("Exporting edition...");

    tokio::spawn(async move {
        let tx_panic = tx.clone();
        match catch_task_panic(async {
            let event = match write_edition(&dir, date, &html).await {
                Ok(path) => AppEvent::ExportComplete { path },
                Err(e) => AppEvent::ExportFailed {
                    error: e.to_string(),
                },
            };
            if let Err(e) = tx.send(event).await {
                tracing::warn!(error = %e, event = "Export", "Channel send failed (receiver dropped)");
            }
        })
        .await
        {
            Ok(()) => {}
            Err(panic_msg) => {
                tracing::error!(task = "export", error = %panic_msg, "Background task panicked");
                let _ = tx_panic
                    .send(AppEvent::TaskPanicked {
                        task: "export",
                        error: panic_msg,
                    })
                    .await;
            }
        }
    });
}

/// Open the lead story's link in the system browser.
pub(super) fn open_lead(app: &mut App) {
    let Some(link) = app.lead_link().map(str::to_owned) else {
        app.set_status("No lead story to open");
        return;
    };

    // Links come from the API; only http(s) reaches the opener
    let url = match validate_link(&link) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(link = %link, error = %e, "Refusing to open lead link");
            app.set_status(format!("Cannot open link: {}", e));
            return;
        }
    };

    match open::that(url.as_str()) {
        Ok(()) => app.set_status("Opened in browser"),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to open browser");
            app.set_status("Failed to open browser");
        }
    }
}
