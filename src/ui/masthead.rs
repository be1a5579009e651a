use crate::app::App;
use crate::feed::CategoryFilter;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// Rows taken by the masthead, including its bottom rule.
pub(super) const HEIGHT: u16 = 3;

const TITLE: &str = "THE DAILY AI";

/// Render the paper's name, the edition date and the active section.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let section = match app.feed.filter() {
        CategoryFilter::All => "ALL SECTIONS",
        CategoryFilter::Only(category) => category.label(),
    };

    let mut dateline = vec![
        Span::styled(app.dateline(), app.style("dateline")),
        Span::styled("  ·  ", app.style("dateline")),
        Span::styled(section, app.style("meta")),
    ];
    if app.loading {
        dateline.push(Span::styled("  ·  updating…", app.style("dateline")));
    }

    let text = vec![
        Line::from(Span::styled(TITLE, app.style("masthead"))),
        Line::from(dateline),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Double)
            .border_style(app.style("card_border")),
    );
    f.render_widget(paragraph, area);
}
