//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry; the digit keys jump
//! straight to a page.

use crate::app::{App, AppEvent};
use crate::feed::CategoryFilter;
use crate::keybindings::Action as KbAction;
use crate::share::share_edition;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{open_lead, spawn_export, spawn_load};
use super::Action;

/// Main input dispatch function.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Help overlay captures all keys while visible
    if app.show_help {
        if matches!(code, KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc) {
            app.show_help = false;
        }
        return Ok(Action::Continue);
    }

    if let KeyCode::Char(c @ '1'..='9') = code {
        if modifiers.is_empty() {
            let page = c as usize - '0' as usize;
            if !app.select_page(page) {
                app.set_status(format!(
                    "No page {} (1-{})",
                    page,
                    app.feed.total_pages()
                ));
            }
            return Ok(Action::Continue);
        }
    }

    let Some(action) = app.keybindings.action_for_key(code, modifiers) else {
        return Ok(Action::Continue);
    };

    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::Refresh => spawn_load(app, event_tx),
        KbAction::NextCategory => {
            app.next_category();
            announce_filter(app);
        }
        KbAction::PrevCategory => {
            app.prev_category();
            announce_filter(app);
        }
        KbAction::AllCategories => {
            app.set_filter(CategoryFilter::All);
            announce_filter(app);
        }
        KbAction::NextPage => {
            app.next_page();
        }
        KbAction::PrevPage => {
            app.prev_page();
        }
        KbAction::ScrollDown => app.scroll_grid_down(),
        KbAction::ScrollUp => app.scroll_grid_up(),
        KbAction::ToggleDark => {
            app.toggle_dark().await?;
            app.set_status(format!("{} theme", app.theme_variant.name()));
        }
        KbAction::Share => {
            if share_edition(&app.dateline(), &app.config.edition_url) {
                app.set_status("Opened share link");
            }
        }
        KbAction::Export => spawn_export(app, event_tx),
        KbAction::OpenLead => open_lead(app),
        KbAction::ShowHelp => app.show_help = true,
    }

    Ok(Action::Continue)
}

fn announce_filter(app: &mut App) {
    let label = match app.feed.filter() {
        CategoryFilter::All => "ALL".to_string(),
        CategoryFilter::Only(category) => category.label().to_string(),
    };
    app.set_status(format!(
        "Category: {} ({} articles)",
        label,
        app.feed.filtered_len()
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::{Article, Category};
    use crate::preferences::Preferences;
    use crate::storage::Database;

    async fn test_app() -> App {
        let db = Database::open(":memory:").await.unwrap();
        let mut app = App::new(db, Config::default(), Preferences::default()).unwrap();
        let generation = app.start_load();
        let articles = (0..13)
            .map(|i| Article {
                title: format!("Bulletin {}", i),
                summary: None,
                link: format!("https://example.com/{}", i),
                image: None,
                published: None,
            })
            .collect();
        app.apply_load(generation, Ok(articles));
        app
    }

    async fn press(app: &mut App, code: KeyCode) -> Action {
        let (tx, _rx) = mpsc::channel(4);
        handle_input(app, code, KeyModifiers::NONE, &tx).await.unwrap()
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = test_app().await;
        assert!(matches!(press(&mut app, KeyCode::Char('q')).await, Action::Quit));
        assert!(matches!(press(&mut app, KeyCode::Esc).await, Action::Quit));
    }

    #[tokio::test]
    async fn test_digit_jumps_to_page() {
        let mut app = test_app().await;
        press(&mut app, KeyCode::Char('2')).await;
        assert_eq!(app.feed.current_page(), 2);

        press(&mut app, KeyCode::Char('9')).await;
        assert_eq!(app.feed.current_page(), 2);
        assert!(app
            .status_message
            .as_ref()
            .is_some_and(|(m, _)| m.starts_with("No page 9")));
    }

    #[tokio::test]
    async fn test_page_keys() {
        let mut app = test_app().await;
        press(&mut app, KeyCode::Right).await;
        assert_eq!(app.feed.current_page(), 2);
        press(&mut app, KeyCode::Char('n')).await;
        assert_eq!(app.feed.current_page(), 2);
        press(&mut app, KeyCode::Char('p')).await;
        assert_eq!(app.feed.current_page(), 1);
    }

    #[tokio::test]
    async fn test_category_keys_reset_page() {
        let mut app = test_app().await;
        press(&mut app, KeyCode::Char('2')).await;

        press(&mut app, KeyCode::Char('c')).await;
        assert_eq!(app.feed.filter(), CategoryFilter::Only(Category::India));
        assert_eq!(app.feed.current_page(), 1);

        press(&mut app, KeyCode::Char('a')).await;
        assert_eq!(app.feed.filter(), CategoryFilter::All);
        assert!(app
            .status_message
            .as_ref()
            .is_some_and(|(m, _)| m == "Category: ALL (13 articles)"));
    }

    #[tokio::test]
    async fn test_toggle_dark_key() {
        let mut app = test_app().await;
        press(&mut app, KeyCode::Char('d')).await;
        assert!(app.is_dark());
        assert!(app
            .status_message
            .as_ref()
            .is_some_and(|(m, _)| m == "Dark theme"));

        press(&mut app, KeyCode::Char('d')).await;
        assert!(!app.is_dark());
        assert!(app
            .status_message
            .as_ref()
            .is_some_and(|(m, _)| m == "Light theme"));
    }

    #[tokio::test]
    async fn test_help_overlay_captures_keys() {
        let mut app = test_app().await;
        press(&mut app, KeyCode::Char('?')).await;
        assert!(app.show_help);

        // Page keys do nothing while help is open, and q only closes it
        press(&mut app, KeyCode::Char('2')).await;
        assert_eq!(app.feed.current_page(), 1);
        assert!(matches!(
            press(&mut app, KeyCode::Char('q')).await,
            Action::Continue
        ));
        assert!(!app.show_help);
    }

    #[tokio::test]
    async fn test_refresh_issues_new_generation() {
        let mut app = test_app().await;
        let before = app.load_generation;
        press(&mut app, KeyCode::Char('r')).await;
        assert_eq!(app.load_generation, before + 1);
        assert!(app.loading);
    }
}
