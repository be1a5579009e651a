use crate::config::Config;
use crate::feed::{Article, CategoryFilter, FeedState, RenderScope};
use crate::keybindings::KeybindingRegistry;
use crate::preferences::{DisplayMode, Preferences};
use crate::render::edition_html;
use crate::storage::Database;
use crate::theme::{StyleMap, ThemeVariant};
use crate::view::{dateline, lead_view, LeadView};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use ratatui::style::Style;
use reqwest::redirect::Policy;
use std::borrow::Cow;
use std::path::PathBuf;
use tokio::time::Instant;

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// At most 3 redirect hops, and never back to a URL already visited.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        if attempt.previous().iter().any(|prev| prev == url) {
            return attempt.error("Redirect loop detected");
        }

        tracing::debug!(to = %url, hop = attempt.previous().len() + 1, "Following redirect");
        attempt.follow()
    })
}

// ============================================================================
// Events
// ============================================================================

/// Events sent from background tasks back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// An article load finished.
    ///
    /// `generation` is the value returned by [`App::start_load`] when the
    /// load was issued; completions from superseded loads are discarded.
    ArticlesLoaded {
        generation: u64,
        result: Result<Vec<Article>, String>,
    },
    ExportComplete {
        path: PathBuf,
    },
    ExportFailed {
        error: String,
    },
    /// A background task panicked.
    TaskPanicked {
        task: &'static str,
        error: String,
    },
}

/// What [`App::apply_load`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The articles replaced the previous list.
    Applied(usize),
    /// Prior articles were kept and the failure notice is showing.
    Failed,
    /// A newer load was issued after this one; nothing changed.
    Stale,
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub db: Database,
    pub http_client: reqwest::Client,
    pub config: Config,

    /// Articles, active filter and current page.
    pub feed: FeedState,
    /// Generation of the most recently issued load.
    pub load_generation: u64,
    /// True while the latest issued load has not completed.
    pub loading: bool,

    pub preferences: Preferences,
    pub theme_variant: ThemeVariant,
    pub theme: StyleMap,
    pub keybindings: KeybindingRegistry,
    pub show_help: bool,

    /// Lead section, rebuilt only on full renders.
    pub lead: LeadView,
    /// First visible card of the current page.
    pub grid_scroll: usize,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    /// Set when state changed since the last frame.
    pub needs_redraw: bool,
}

impl App {
    pub fn new(db: Database, config: Config, preferences: Preferences) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .redirect(create_redirect_policy())
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(std::time::Duration::from_secs(30))
            .tcp_keepalive(std::time::Duration::from_secs(60))
            .timeout(config.request_timeout())
            .build()?;

        let mut keybindings = KeybindingRegistry::new();
        for warning in keybindings.apply_overrides(&config.keybindings) {
            tracing::warn!(warning = %warning, "Keybinding override skipped");
        }

        let theme_variant = ThemeVariant::from(preferences.mode());
        let feed = FeedState::new();
        let lead = lead_view(&feed);

        Ok(Self {
            db,
            http_client,
            config,
            feed,
            load_generation: 0,
            loading: false,
            preferences,
            theme_variant,
            theme: StyleMap::from_palette(&theme_variant.palette()),
            keybindings,
            show_help: false,
            lead,
            grid_scroll: 0,
            status_message: None,
            needs_redraw: true,
        })
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Issue a new load generation. The caller spawns the fetch with it.
    ///
    /// Any load still in flight keeps running; its completion will be
    /// discarded by [`App::apply_load`].
    pub fn start_load(&mut self) -> u64 {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.loading = true;
        self.set_status("Loading articles...");
        tracing::debug!(generation = self.load_generation, "Article load started");
        self.load_generation
    }

    /// Apply a load completion.
    pub fn apply_load(
        &mut self,
        generation: u64,
        result: Result<Vec<Article>, String>,
    ) -> LoadOutcome {
        if generation != self.load_generation {
            tracing::warn!(
                generation,
                latest = self.load_generation,
                "Discarding stale article load"
            );
            return LoadOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(articles) => {
                let count = articles.len();
                let scope = self.feed.replace_articles(articles);
                self.apply_scope(scope);
                tracing::info!(count, generation, "Articles loaded");
                self.set_status(format!("Loaded {} articles", count));
                LoadOutcome::Applied(count)
            }
            Err(error) => {
                tracing::error!(error = %error, generation, "Failed to load articles");
                self.feed.mark_load_failed();
                self.grid_scroll = 0;
                self.needs_redraw = true;
                LoadOutcome::Failed
            }
        }
    }

    // ========================================================================
    // Filter & Pagination
    // ========================================================================

    fn apply_scope(&mut self, scope: RenderScope) {
        if scope == RenderScope::Full {
            self.lead = lead_view(&self.feed);
        }
        self.grid_scroll = 0;
        self.needs_redraw = true;
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        let scope = self.feed.set_filter(filter);
        self.apply_scope(scope);
        tracing::debug!(filter = %filter, shown = self.feed.filtered_len(), "Filter changed");
    }

    pub fn next_category(&mut self) {
        self.set_filter(self.feed.filter().next());
    }

    pub fn prev_category(&mut self) {
        self.set_filter(self.feed.filter().prev());
    }

    /// Jump to `page`. Returns false (and changes nothing) when out of range.
    pub fn select_page(&mut self, page: usize) -> bool {
        match self.feed.select_page(page) {
            Some(scope) => {
                self.apply_scope(scope);
                true
            }
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        match self.feed.next_page() {
            Some(scope) => {
                self.apply_scope(scope);
                true
            }
            None => false,
        }
    }

    pub fn prev_page(&mut self) -> bool {
        match self.feed.prev_page() {
            Some(scope) => {
                self.apply_scope(scope);
                true
            }
            None => false,
        }
    }

    /// Scroll the grid by whole cards, staying within the current page.
    pub fn scroll_grid_down(&mut self) {
        let last = self.feed.page_items().len().saturating_sub(1);
        self.grid_scroll = (self.grid_scroll + 1).min(last);
    }

    pub fn scroll_grid_up(&mut self) {
        self.grid_scroll = self.grid_scroll.saturating_sub(1);
    }

    // ========================================================================
    // Display Mode & Theme
    // ========================================================================

    pub fn display_mode(&self) -> DisplayMode {
        self.preferences.mode()
    }

    pub fn is_dark(&self) -> bool {
        self.display_mode().is_dark()
    }

    /// Flip dark mode, persisting it before the theme changes.
    pub async fn toggle_dark(&mut self) -> Result<DisplayMode> {
        let mode = self.preferences.toggle(&self.db).await?;
        self.set_theme(ThemeVariant::from(mode));
        Ok(mode)
    }

    fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    // ========================================================================
    // Edition
    // ========================================================================

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Masthead date for today.
    pub fn dateline(&self) -> String {
        dateline(Self::today())
    }

    /// Standalone HTML for what is currently on screen.
    pub fn edition_html(&self) -> String {
        edition_html(&self.feed, &self.dateline(), self.is_dark())
    }

    /// Link of the lead story, if any.
    pub fn lead_link(&self) -> Option<&str> {
        self.lead.lead.as_ref().map(|l| l.link.as_str())
    }

    // ========================================================================
    // Status
    // ========================================================================

    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Clear the status message once it is 3 seconds old.
    /// Returns true if a message was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
