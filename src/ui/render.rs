//! Render functions for the TUI.
//!
//! Lays out the page top to bottom: masthead, lead row, card grid,
//! pagination bar and status bar, with the help overlay drawn on top.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::{Block, Paragraph},
    Frame,
};

use super::{grid, help, lead, masthead, pagination, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 20;

pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    f.render_widget(Block::default().style(app.style("background")), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(masthead::HEIGHT),
            Constraint::Percentage(38),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    masthead::render(f, app, chunks[0]);
    lead::render(f, app, chunks[1]);
    grid::render(f, app, chunks[2]);
    pagination::render(f, app, chunks[3]);
    status::render(f, app, chunks[4]);

    if app.show_help {
        help::render(f, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::{Article, Published};
    use crate::preferences::Preferences;
    use crate::storage::Database;
    use ratatui::{backend::TestBackend, Terminal};

    async fn loaded_app(n: usize) -> App {
        let db = Database::open(":memory:").await.unwrap();
        let mut app = App::new(db, Config::default(), Preferences::default()).unwrap();
        let generation = app.start_load();
        let articles = (0..n)
            .map(|i| Article {
                title: format!("Story number {}", i),
                summary: Some(format!("Summary for story {}", i)),
                link: format!("https://example.com/{}", i),
                image: None,
                published: Some(Published::EpochMillis(1_700_000_000_000)),
            })
            .collect();
        app.apply_load(generation, Ok(articles));
        app
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[tokio::test]
    async fn test_full_page_renders_sections() {
        let app = loaded_app(13).await;
        let screen = draw(&app, 120, 40);

        assert!(screen.contains("THE DAILY AI"));
        assert!(screen.contains("Story number 0"));
        assert!(screen.contains("Other headlines"));
        assert!(screen.contains("Story number 1"));
        assert!(screen.contains(" 1 "));
        assert!(screen.contains(" 2 "));
    }

    #[tokio::test]
    async fn test_failed_load_renders_notice() {
        let mut app = loaded_app(3).await;
        let generation = app.start_load();
        app.apply_load(generation, Err("down".to_string()));

        let screen = draw(&app, 120, 40);
        assert!(screen.contains("Failed to load articles. Start backend or check network."));
        assert!(screen.contains("Story number 0"));
    }

    #[tokio::test]
    async fn test_empty_page_renders_message() {
        let app = loaded_app(1).await;
        let screen = draw(&app, 120, 40);
        assert!(screen.contains("No articles in this category/page."));
    }

    #[tokio::test]
    async fn test_headline_dates_are_sanitized() {
        let db = Database::open(":memory:").await.unwrap();
        let mut app = App::new(db, Config::default(), Preferences::default()).unwrap();
        let generation = app.start_load();
        let articles = (0..3)
            .map(|i| Article {
                title: format!("Story number {}", i),
                summary: None,
                link: format!("https://example.com/{}", i),
                image: None,
                published: Some(Published::Text("\x1b[31mRED\x1b[0m yesterday".to_string())),
            })
            .collect();
        app.apply_load(generation, Ok(articles));

        let screen = draw(&app, 120, 40);
        assert!(screen.contains("RED yesterday"));
        assert!(!screen.contains("[31m"));
        assert!(!screen.contains('\x1b'));
    }

    #[tokio::test]
    async fn test_too_small_terminal() {
        let app = loaded_app(3).await;
        let screen = draw(&app, 40, 10);
        assert!(screen.contains("Terminal too small"));
    }

    #[tokio::test]
    async fn test_help_overlay_renders() {
        let mut app = loaded_app(3).await;
        app.show_help = true;
        let screen = draw(&app, 120, 40);
        assert!(screen.contains("Toggle dark mode"));
    }
}
