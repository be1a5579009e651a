//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! `ThemeVariant` picks the Light (newsprint) or Dark palette from the
//! persisted display mode, and `StyleMap` resolves role names to styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

use crate::preferences::DisplayMode;

// ============================================================================
// Theme Variant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

impl From<DisplayMode> for ThemeVariant {
    fn from(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Dark => Self::Dark,
            DisplayMode::Normal => Self::Light,
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Page --
    pub background: Style,
    pub masthead: Style,
    pub dateline: Style,

    // -- Lead --
    pub lead_title: Style,
    pub body: Style,
    pub meta: Style,
    pub headline: Style,

    // -- Grid --
    pub card_title: Style,
    pub card_border: Style,
    pub notice: Style,

    // -- Chrome --
    pub page_active: Style,
    pub page_inactive: Style,
    pub status_bar: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            background: Style::default().bg(Color::Black).fg(Color::Gray),
            masthead: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            dateline: Style::default().fg(Color::DarkGray),

            lead_title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            body: Style::default().fg(Color::Gray),
            meta: Style::default().fg(Color::DarkGray),
            headline: Style::default().fg(Color::White),

            card_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            card_border: Style::default().fg(Color::DarkGray),
            notice: Style::default().fg(Color::Yellow),

            page_active: Style::default()
                .bg(Color::Gray)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            page_inactive: Style::default().fg(Color::DarkGray),
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
        }
    }

    fn light() -> Self {
        Self {
            background: Style::default().bg(Color::White).fg(Color::Black),
            masthead: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            dateline: Style::default().fg(Color::DarkGray),

            lead_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            body: Style::default().fg(Color::Black),
            meta: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            headline: Style::default().fg(Color::Black),

            card_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            card_border: Style::default().fg(Color::Gray),
            notice: Style::default().fg(Color::Red),

            page_active: Style::default()
                .bg(Color::Black)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            page_inactive: Style::default().fg(Color::DarkGray),
            status_bar: Style::default().bg(Color::Gray).fg(Color::Black),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup used by the widgets.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 13] = [
    "background",
    "masthead",
    "dateline",
    "lead_title",
    "body",
    "meta",
    "headline",
    "card_title",
    "card_border",
    "notice",
    "page_active",
    "page_inactive",
    "status_bar",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 13] = [
            p.background,
            p.masthead,
            p.dateline,
            p.lead_title,
            p.body,
            p.meta,
            p.headline,
            p.card_title,
            p.card_border,
            p.notice,
            p.page_active,
            p.page_inactive,
            p.status_bar,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
