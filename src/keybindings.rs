//! Keybinding registry: maps key events to actions, with config overrides.
//!
//! Page jumps on the digit keys `1`-`9` are handled directly by the input
//! layer and are not part of the registry.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Refresh,
    NextCategory,
    PrevCategory,
    AllCategories,
    NextPage,
    PrevPage,
    ScrollDown,
    ScrollUp,
    ToggleDark,
    Share,
    Export,
    OpenLead,
    ShowHelp,
}

impl Action {
    /// Description for the help overlay.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::Refresh => "Reload articles",
            Self::NextCategory => "Next category",
            Self::PrevCategory => "Previous category",
            Self::AllCategories => "Show all categories",
            Self::NextPage => "Next page",
            Self::PrevPage => "Previous page",
            Self::ScrollDown => "Scroll cards down",
            Self::ScrollUp => "Scroll cards up",
            Self::ToggleDark => "Toggle dark mode",
            Self::Share => "Share edition link",
            Self::Export => "Export edition as HTML",
            Self::OpenLead => "Open lead story in browser",
            Self::ShowHelp => "Show help",
        }
    }

    /// Parse an action name from config (`snake_case`, case-insensitive).
    fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "quit" => Some(Self::Quit),
            "refresh" | "reload" => Some(Self::Refresh),
            "next_category" => Some(Self::NextCategory),
            "prev_category" => Some(Self::PrevCategory),
            "all_categories" | "all" => Some(Self::AllCategories),
            "next_page" => Some(Self::NextPage),
            "prev_page" => Some(Self::PrevPage),
            "scroll_down" => Some(Self::ScrollDown),
            "scroll_up" => Some(Self::ScrollUp),
            "toggle_dark" | "dark" => Some(Self::ToggleDark),
            "share" => Some(Self::Share),
            "export" => Some(Self::Export),
            "open_lead" | "open" => Some(Self::OpenLead),
            "show_help" | "help" => Some(Self::ShowHelp),
            _ => None,
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Terminals report uppercase letters with SHIFT set; the char already
    /// carries the case, so SHIFT is dropped for character keys.
    fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) => Self::new(self.code, self.modifiers.difference(KeyModifiers::SHIFT)),
            _ => self,
        }
    }
}

/// Parse a config key string: `"q"`, `"Ctrl+r"`, `"Esc"`, `"Left"`, `"F5"`.
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let mut chars = rest.trim().chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    let named = match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "space" => Some(KeyCode::Char(' ')),
        _ => None,
    };
    if let Some(code) = named {
        return Some(KeySpec::plain(code));
    }

    if let Some(n) = s.strip_prefix(['F', 'f']).and_then(|n| n.parse::<u8>().ok()) {
        return (1..=12).contains(&n).then_some(KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::char(c)),
        _ => None,
    }
}

/// Human-readable key for the help overlay.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

const DEFAULT_BINDINGS: &[(KeySpec, Action)] = &[
    (KeySpec::char('q'), Action::Quit),
    (KeySpec::plain(KeyCode::Esc), Action::Quit),
    (KeySpec::char('r'), Action::Refresh),
    (KeySpec::char('c'), Action::NextCategory),
    (KeySpec::char('C'), Action::PrevCategory),
    (KeySpec::char('a'), Action::AllCategories),
    (KeySpec::char('n'), Action::NextPage),
    (KeySpec::plain(KeyCode::Right), Action::NextPage),
    (KeySpec::char('p'), Action::PrevPage),
    (KeySpec::plain(KeyCode::Left), Action::PrevPage),
    (KeySpec::char('j'), Action::ScrollDown),
    (KeySpec::plain(KeyCode::Down), Action::ScrollDown),
    (KeySpec::char('k'), Action::ScrollUp),
    (KeySpec::plain(KeyCode::Up), Action::ScrollUp),
    (KeySpec::char('d'), Action::ToggleDark),
    (KeySpec::char('s'), Action::Share),
    (KeySpec::char('e'), Action::Export),
    (KeySpec::char('o'), Action::OpenLead),
    (KeySpec::char('?'), Action::ShowHelp),
];

/// Key → action lookup with the defaults above and optional overrides.
pub struct KeybindingRegistry {
    lookup: HashMap<KeySpec, Action>,
    /// Bindings in registration order, for the help overlay.
    bindings: Vec<(KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::with_capacity(DEFAULT_BINDINGS.len()),
            bindings: Vec::with_capacity(DEFAULT_BINDINGS.len()),
        };
        for &(key, action) in DEFAULT_BINDINGS {
            registry.bind(key, action);
        }
        registry
    }

    fn bind(&mut self, key: KeySpec, action: Action) {
        // A key maps to one action; rebinding a key drops its old entry
        self.bindings.retain(|(k, _)| *k != key);
        self.lookup.insert(key, action);
        self.bindings.push((key, action));
    }

    /// Apply overrides from the `[keybindings]` config table.
    ///
    /// Keys are action names (`"share"`, `"next_page"`), values key strings.
    /// An override replaces every default key of that action. Returns one
    /// warning per entry that could not be applied.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let Some(action) = Action::from_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };
            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, a)| *a != action);
            self.bind(key.normalized(), action);

            tracing::info!(action = %action_name, key = %key_str, "Applied keybinding override");
        }

        warnings
    }

    pub fn action_for_key(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        let key = KeySpec::new(code, modifiers).normalized();
        self.lookup.get(&key).copied()
    }

    /// `(key, description)` rows for the help overlay, one per action with
    /// all of its keys joined.
    pub fn help_rows(&self) -> Vec<(String, &'static str)> {
        let mut rows: Vec<(Action, Vec<String>)> = Vec::new();
        for (key, action) in &self.bindings {
            match rows.iter_mut().find(|(a, _)| a == action) {
                Some((_, keys)) => keys.push(format_key(key)),
                None => rows.push((*action, vec![format_key(key)])),
            }
        }
        rows.into_iter()
            .map(|(action, keys)| (keys.join(" / "), action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(reg: &KeybindingRegistry, code: KeyCode) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(lookup(&reg, KeyCode::Esc), Some(Action::Quit));
        assert_eq!(lookup(&reg, KeyCode::Char('r')), Some(Action::Refresh));
        assert_eq!(lookup(&reg, KeyCode::Right), Some(Action::NextPage));
        assert_eq!(lookup(&reg, KeyCode::Char('p')), Some(Action::PrevPage));
        assert_eq!(lookup(&reg, KeyCode::Char('d')), Some(Action::ToggleDark));
        assert_eq!(lookup(&reg, KeyCode::Char('s')), Some(Action::Share));
        assert_eq!(lookup(&reg, KeyCode::Char('e')), Some(Action::Export));
    }

    #[test]
    fn test_shifted_letter_matches() {
        let reg = KeybindingRegistry::new();
        assert_eq!(
            reg.action_for_key(KeyCode::Char('C'), KeyModifiers::SHIFT),
            Some(Action::PrevCategory)
        );
        assert_eq!(
            reg.action_for_key(KeyCode::Char('c'), KeyModifiers::NONE),
            Some(Action::NextCategory)
        );
    }

    #[test]
    fn test_unbound_keys() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::F(12)), None);
        assert_eq!(lookup(&reg, KeyCode::Char('1')), None);
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL),
            None
        );
    }

    #[test]
    fn test_override_replaces_all_default_keys() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("next_page".to_string(), "Space".to_string())]);

        assert!(reg.apply_overrides(&overrides).is_empty());
        assert_eq!(lookup(&reg, KeyCode::Char(' ')), Some(Action::NextPage));
        assert_eq!(lookup(&reg, KeyCode::Char('n')), None);
        assert_eq!(lookup(&reg, KeyCode::Right), None);
    }

    #[test]
    fn test_override_steals_key_from_other_action() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([("share".to_string(), "e".to_string())]);

        assert!(reg.apply_overrides(&overrides).is_empty());
        assert_eq!(lookup(&reg, KeyCode::Char('e')), Some(Action::Share));
        assert!(!reg
            .help_rows()
            .iter()
            .any(|(_, desc)| *desc == Action::Export.describe()));
    }

    #[test]
    fn test_override_warnings() {
        let mut reg = KeybindingRegistry::new();
        let overrides = HashMap::from([
            ("teleport".to_string(), "t".to_string()),
            ("quit".to_string(), "Ctrl+Alt+q".to_string()),
        ]);

        let mut warnings = reg.apply_overrides(&overrides);
        warnings.sort();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Cannot parse key"));
        assert!(warnings[1].contains("Unknown action"));
        assert_eq!(lookup(&reg, KeyCode::Char('q')), Some(Action::Quit));
    }

    #[test]
    fn test_parse_key_string() {
        assert_eq!(parse_key_string("Esc"), Some(KeySpec::plain(KeyCode::Esc)));
        assert_eq!(parse_key_string("left"), Some(KeySpec::plain(KeyCode::Left)));
        assert_eq!(parse_key_string("Ctrl+r"), Some(KeySpec::ctrl('r')));
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(parse_key_string("F13"), None);
        assert_eq!(parse_key_string("x"), Some(KeySpec::char('x')));
        assert_eq!(parse_key_string("xy"), None);
    }

    #[test]
    fn test_help_rows_group_keys() {
        let reg = KeybindingRegistry::new();
        let rows = reg.help_rows();
        assert_eq!(rows[0], ("q / Esc".to_string(), "Quit"));
        assert!(rows.contains(&("n / Right".to_string(), "Next page")));
    }
}
