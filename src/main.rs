use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc;

use broadsheet::app::{App, AppEvent};
use broadsheet::config::Config;
use broadsheet::feed::{fetch_articles, CategoryFilter, FeedState};
use broadsheet::preferences::Preferences;
use broadsheet::render::edition_html;
use broadsheet::storage::{Database, DatabaseError};
use broadsheet::ui;
use broadsheet::view::dateline;

/// Get the config directory path (~/.config/broadsheet/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("broadsheet"))
}

#[derive(Parser, Debug)]
#[command(
    name = "broadsheet",
    about = "Terminal newspaper for categorized, summarized news articles"
)]
struct Args {
    /// Articles API endpoint (overrides `api_url` in config.toml)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Fetch once and write the edition as HTML instead of starting the TUI
    #[arg(long, value_name = "FILE")]
    render_to: Option<PathBuf>,

    /// Category for --render-to: all, india, sports, tech, business or world
    #[arg(long, value_name = "SEL", default_value = "all")]
    category: CategoryFilter,

    /// Page for --render-to
    #[arg(long, value_name = "N", default_value_t = 1)]
    page: usize,

    /// Flip the stored display mode and exit
    #[arg(long)]
    toggle_dark: bool,

    /// Clear stored preferences
    #[arg(long)]
    reset_db: bool,
}

/// Log to `broadsheet.log` in the config directory so output never lands
/// on the TUI. Falls back to stderr when the file cannot be opened.
fn init_tracing(config_dir: &Path) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_path = config_dir.join("broadsheet.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
            tracing::warn!(path = %log_path.display(), error = %e, "Failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    // User-only access to the directory holding the database
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) =
            std::fs::set_permissions(&config_dir, std::fs::Permissions::from_mode(0o700))
        {
            eprintln!(
                "Warning: failed to set permissions on {}: {}",
                config_dir.display(),
                e
            );
        }
    }

    init_tracing(&config_dir);

    let mut config = Config::load(&config_dir.join("config.toml"))
        .context("Failed to load config.toml")?;
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }

    let db_path = config_dir.join("broadsheet.db");
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!("Error: {}", DatabaseError::InstanceLocked);
            std::process::exit(1);
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to open database: {}", e)),
    };

    if args.reset_db {
        let cleared = db
            .clear_preferences()
            .await
            .context("Failed to reset preferences")?;
        tracing::info!(cleared, "Preferences reset");
        println!("Preferences reset.");
    }

    let mut preferences = Preferences::load(&db)
        .await
        .context("Failed to load preferences")?;

    if args.toggle_dark {
        let mode = preferences
            .toggle(&db)
            .await
            .context("Failed to save display mode")?;
        println!(
            "Dark mode {}",
            if mode.is_dark() { "enabled" } else { "disabled" }
        );
        return Ok(());
    }

    if let Some(out) = args.render_to {
        return render_once(&config, &preferences, args.category, args.page, &out).await;
    }

    let mut app = App::new(db, config, preferences).context("Failed to create application")?;
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}

/// Fetch once, apply the selector and page, and write the edition to `out`.
///
/// A failed fetch still writes the edition, with the load-failure notice in
/// place of the grid.
async fn render_once(
    config: &Config,
    preferences: &Preferences,
    category: CategoryFilter,
    page: usize,
    out: &Path,
) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()
        .context("Failed to create HTTP client")?;

    let mut feed = FeedState::new();
    let failure = match fetch_articles(&client, &config.api_url, config.effective_limit()).await {
        Ok(articles) => {
            feed.replace_articles(articles);
            None
        }
        Err(e) => Some(e),
    };
    feed.set_filter(category);
    if feed.select_page(page).is_none() {
        eprintln!(
            "Warning: no page {} (1-{}), writing page {}",
            page,
            feed.total_pages(),
            feed.current_page()
        );
    }
    if let Some(e) = failure {
        tracing::error!(error = %e, api_url = %config.api_url, "Failed to load articles");
        eprintln!("Warning: {}", e);
        feed.mark_load_failed();
    }

    let date = dateline(App::today());
    let html = edition_html(&feed, &date, preferences.mode().is_dark());
    tokio::fs::write(out, html)
        .await
        .with_context(|| format!("Failed to write {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}
