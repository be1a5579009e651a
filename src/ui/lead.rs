use crate::app::App;
use crate::util::{sanitize_for_terminal, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the lead story beside the "Other headlines" list.
///
/// Both read from `app.lead`, which is only rebuilt on full renders.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    render_lead(f, app, chunks[0]);
    render_headlines(f, app, chunks[1]);
}

fn render_lead(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("card_border"))
        .title(" Top story ");

    let Some(lead) = &app.lead.lead else {
        f.render_widget(block, area);
        return;
    };

    let text = vec![
        Line::from(Span::styled(
            sanitize_for_terminal(&lead.title).into_owned(),
            app.style("lead_title"),
        )),
        Line::from(Span::styled(
            sanitize_for_terminal(&lead.meta).into_owned(),
            app.style("meta"),
        )),
        Line::from(""),
        Line::from(Span::styled(
            sanitize_for_terminal(&lead.summary).into_owned(),
            app.style("body"),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Read full: ", app.style("meta")),
            Span::styled(
                sanitize_for_terminal(&lead.link).into_owned(),
                app.style("headline"),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_headlines(f: &mut Frame, app: &App, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;

    let mut lines = Vec::with_capacity(app.lead.headlines.len() * 2);
    for headline in &app.lead.headlines {
        let title = sanitize_for_terminal(&headline.title);
        lines.push(Line::from(Span::styled(
            truncate_to_width(&title, inner_width).into_owned(),
            app.style("headline"),
        )));
        if !headline.date.is_empty() {
            let date = sanitize_for_terminal(&headline.date);
            lines.push(Line::from(Span::styled(
                truncate_to_width(&date, inner_width).into_owned(),
                app.style("meta"),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("card_border"))
            .title(" Other headlines "),
    );
    f.render_widget(paragraph, area);
}
