//! Card grid for the current page.

use crate::app::App;
use crate::util::{sanitize_for_terminal, truncate_to_width};
use crate::view::{grid_view, CardView, GridView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Minimum height of one card row, borders included.
const CARD_MIN_HEIGHT: u16 = 5;

/// Cards per row for a given grid width.
fn columns_for(width: u16) -> usize {
    if width >= 90 {
        3
    } else if width >= 60 {
        2
    } else {
        1
    }
}

/// Render the grid, or the notice/empty message that replaces it.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let cards = match grid_view(&app.feed) {
        GridView::Cards(cards) => cards,
        GridView::Empty(msg) => {
            let paragraph = Paragraph::new(msg)
                .style(app.style("meta"))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::TOP).border_style(app.style("card_border")));
            f.render_widget(paragraph, area);
            return;
        }
        GridView::Notice(msg) => {
            let paragraph = Paragraph::new(msg)
                .style(app.style("notice"))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::TOP).border_style(app.style("card_border")));
            f.render_widget(paragraph, area);
            return;
        }
    };

    let cols = columns_for(area.width);
    let rows = if area.height >= CARD_MIN_HEIGHT * 2 { 2 } else { 1 };

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    let mut visible = cards.iter().skip(app.grid_scroll);
    for row_area in row_areas.iter() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
            .split(*row_area);
        for cell in cells.iter() {
            match visible.next() {
                Some(card) => render_card(f, app, card, *cell),
                None => return,
            }
        }
    }
}

fn render_card(f: &mut Frame, app: &App, card: &CardView, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let title = sanitize_for_terminal(&card.title);
    let meta = sanitize_for_terminal(&card.meta);

    let text = vec![
        Line::from(Span::styled(
            truncate_to_width(&title, inner_width).into_owned(),
            app.style("card_title"),
        )),
        Line::from(Span::styled(
            truncate_to_width(&meta, inner_width).into_owned(),
            app.style("meta"),
        )),
        Line::from(Span::styled(
            sanitize_for_terminal(&card.summary).into_owned(),
            app.style("body"),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("card_border")),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
