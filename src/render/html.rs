//! HTML writer for the edition view models.
//!
//! Each section routine returns the complete inner markup of its container,
//! so re-rendering replaces the previous output instead of appending to it.

use crate::util::validate_link;
use crate::view::{GridView, LeadView, PaginationView};
use std::fmt::Write;

/// Escape text content. `&` is replaced first so entities are not doubled.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape a value placed inside a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    escape_html(s).replace('"', "&quot;")
}

/// Image tag, or nothing when `src` is not an http(s) URL.
fn image_tag(src: &str, alt: &str, margin_px: u8) -> String {
    if validate_link(src).is_err() {
        tracing::debug!(src = %src, "Skipping image with unsupported URL");
        return String::new();
    }
    format!(
        r#"<img src="{}" alt="{}" style="max-width:100%;height:auto;margin-bottom:{}px;">"#,
        escape_attr(src),
        escape_attr(alt),
        margin_px
    )
}

/// "Read full" anchor, or nothing when `link` is not an http(s) URL.
fn read_full(link: &str) -> String {
    if validate_link(link).is_err() {
        tracing::debug!(link = %link, "Skipping anchor with unsupported URL");
        return String::new();
    }
    format!(
        r#"<p><a href="{}" target="_blank" rel="noreferrer">Read full</a></p>"#,
        escape_attr(link)
    )
}

/// Inner markup of the top-stories container.
///
/// Empty when there is no lead article.
pub fn render_lead(view: &LeadView) -> String {
    let Some(lead) = &view.lead else {
        return String::new();
    };

    let mut out = String::from(r#"<div class="lead">"#);
    if let Some(src) = &lead.image {
        out.push_str(&image_tag(src, &lead.title, 12));
    }
    let _ = write!(
        out,
        r#"<h2>{}</h2><p class="meta">{}</p><p>{}</p>{}</div>"#,
        escape_html(&lead.title),
        escape_html(&lead.meta),
        escape_html(&lead.summary),
        read_full(&lead.link)
    );

    out.push_str(r#"<aside class="side-briefs"><h4>Other headlines</h4>"#);
    for h in &view.headlines {
        let _ = write!(
            out,
            r#"<p><strong>{}</strong><br/><span class="meta">{}</span></p>"#,
            escape_html(&h.title),
            escape_html(&h.date)
        );
    }
    out.push_str("</aside>");
    out
}

/// Inner markup of the articles grid container.
pub fn render_grid(view: &GridView) -> String {
    match view {
        GridView::Empty(msg) | GridView::Notice(msg) => {
            format!(r#"<p style="padding:12px">{}</p>"#, escape_html(msg))
        }
        GridView::Cards(cards) => {
            let mut out = String::new();
            for c in cards {
                out.push_str(r#"<article class="card">"#);
                if let Some(src) = &c.image {
                    out.push_str(&image_tag(src, &c.title, 8));
                }
                let _ = write!(
                    out,
                    r#"<h3>{}</h3><div class="meta">{}</div><p>{}</p>{}</article>"#,
                    escape_html(&c.title),
                    escape_html(&c.meta),
                    escape_html(&c.summary),
                    read_full(&c.link)
                );
            }
            out
        }
    }
}

/// Inner markup of the pagination container: one button per page.
pub fn render_pagination(view: &PaginationView) -> String {
    let mut out = String::new();
    for p in &view.pages {
        if p.active {
            let _ = write!(
                out,
                r#"<button class="active" data-page="{0}">{0}</button>"#,
                p.number
            );
        } else {
            let _ = write!(out, r#"<button data-page="{0}">{0}</button>"#, p.number);
        }
    }
    out
}

/// Everything needed to write a standalone edition document.
pub struct Edition<'a> {
    pub date: &'a str,
    pub category: &'a str,
    pub dark: bool,
    pub lead: &'a LeadView,
    pub grid: &'a GridView,
    pub pagination: &'a PaginationView,
}

const STYLE: &str = r#"
body { font-family: Georgia, serif; max-width: 1100px; margin: 0 auto; padding: 16px; background: #fdfcf8; color: #111; }
body.dark { background: #121212; color: #e8e8e8; }
header { border-bottom: 3px double currentColor; margin-bottom: 16px; }
.meta { color: #777; font-size: 0.85em; }
#topStories { display: grid; grid-template-columns: 2fr 1fr; gap: 24px; }
#articlesGrid { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; margin-top: 24px; }
.card { border-top: 1px solid #ccc; padding-top: 8px; }
#pagination button { margin: 2px; }
#pagination button.active { font-weight: bold; text-decoration: underline; }
a { color: inherit; }
"#;

/// Standalone HTML document for the current edition.
pub fn render_document(edition: &Edition<'_>) -> String {
    let body_class = if edition.dark { r#" class="dark""# } else { "" };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>The Daily AI - {date}</title>
<style>{style}</style>
</head>
<body{body_class}>
<div id="paper">
<header><h1>The Daily AI</h1><p class="meta"><span id="dateSpan">{date}</span> &middot; {category}</p></header>
<section id="topStories">{lead}</section>
<section id="articlesGrid">{grid}</section>
<nav id="pagination">{pagination}</nav>
</div>
</body>
</html>
"#,
        date = escape_html(edition.date),
        style = STYLE,
        body_class = body_class,
        category = escape_html(&edition.category.to_uppercase()),
        lead = render_lead(edition.lead),
        grid = render_grid(edition.grid),
        pagination = render_pagination(edition.pagination),
    )
}
