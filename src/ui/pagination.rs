use crate::app::App;
use crate::view::pagination_view;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render one control per page, the current one highlighted.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let view = pagination_view(&app.feed);
    let mut spans = Vec::with_capacity(view.pages.len() * 2 + 1);
    spans.push(Span::styled("Page ", app.style("meta")));
    for control in &view.pages {
        let role = if control.active {
            "page_active"
        } else {
            "page_inactive"
        };
        spans.push(Span::styled(format!(" {} ", control.number), app.style(role)));
        spans.push(Span::raw(" "));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
