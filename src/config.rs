//! Configuration — the static landing-page setup plus user overrides.
//!
//! User overrides (key bindings, layout strategy, asset directory) are
//! stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/naox-landing/config.toml`
//! (default `~/.config/naox-landing/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::grid::GridConfig;
use crate::core::layout::CellMetrics;
use crate::core::project::PROJECTS;
use crate::core::theme::Theme;
use crate::ui::toolkit::ToolkitConfig;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    PageUp,
    PageDown,
    FocusNext,
    FocusPrev,
    Activate,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when writing the config file).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::ScrollLeft,
        Action::ScrollRight,
        Action::PageUp,
        Action::PageDown,
        Action::FocusNext,
        Action::FocusPrev,
        Action::Activate,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::ScrollLeft => "scroll_left",
            Action::ScrollRight => "scroll_right",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::FocusNext => "focus_next",
            Action::FocusPrev => "focus_prev",
            Action::Activate => "activate",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Shift+Tab"`, `"↑"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            _ => key_name(self.code),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Shift+BackTab"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+BackTab"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            _ => {
                // Single characters keep their case ("G" ≠ "g").
                let mut chars = key_part.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── layout strategy ───

/// How the project cards are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LayoutStrategy {
    /// Responsive grid driven by the grid helper.
    #[default]
    Grid,
    /// One horizontal, scrollable row.
    Row,
}

impl LayoutStrategy {
    pub fn label(self) -> &'static str {
        match self {
            LayoutStrategy::Grid => "grid",
            LayoutStrategy::Row => "row",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "grid" => Some(LayoutStrategy::Grid),
            "row" => Some(LayoutStrategy::Row),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── user config ───────

/// User overrides read from the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub layout: LayoutStrategy,
    pub assets_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            layout: LayoutStrategy::default(),
            assets_dir: None,
        }
    }
}

impl AppConfig {
    /// Built-in key bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(ScrollLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(ScrollRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(
            Action::PageDown,
            vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)],
        );
        m.insert(FocusNext, vec![KeyBind::new(Tab, n)]);
        m.insert(FocusPrev, vec![KeyBind::new(BackTab, shift)]);
        m.insert(Activate, vec![KeyBind::new(Enter, n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: next link | {}: open | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::FocusNext),
            self.short_binding(Action::Activate),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load the user config, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loaded user config");
                Self::parse_config(&contents)
            }
            Err(e) => {
                if path.exists() {
                    tracing::warn!(path = %path.display(), "unreadable config, using defaults: {e}");
                }
                Self::default()
            }
        }
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "layout" => {
                    match LayoutStrategy::parse(value.trim_matches('"')) {
                        Some(layout) => config.layout = layout,
                        None => tracing::warn!(value, "unknown layout strategy"),
                    }
                    continue;
                }
                "assets_dir" => {
                    let dir = value.trim_matches('"');
                    if !dir.is_empty() {
                        config.assets_dir = Some(PathBuf::from(dir));
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    /// Render the config in the on-disk format.
    pub fn serialise(&self) -> String {
        let mut lines = vec![
            "# naox-landing configuration".to_string(),
            String::new(),
            "# Card layout: grid | row".to_string(),
            format!("layout = {}", self.layout.label()),
        ];
        match &self.assets_dir {
            Some(dir) => lines.push(format!("assets_dir = {}", dir.display())),
            None => lines.push("# assets_dir = assets".to_string()),
        }
        lines.extend([
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab, BackTab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ]);

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/naox-landing/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

// ───────────────────────────────────────── landing config ────

/// Static description of the landing page, built once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct LandingConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub window_title: String,
    pub theme: Theme,
    pub metrics: CellMetrics,
    pub assets_dir: PathBuf,
    pub layout: LayoutStrategy,
    pub grid: GridConfig,
    pub keys: AppConfig,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            window_width: 1440,
            window_height: 900,
            window_title: "NaoX".to_string(),
            theme: Theme::naox(),
            metrics: CellMetrics::default(),
            assets_dir: PathBuf::from("assets"),
            layout: LayoutStrategy::Grid,
            grid: GridConfig::default(),
            keys: AppConfig::default(),
        }
    }
}

impl LandingConfig {
    /// Defaults overlaid with the user's config file.
    pub fn with_user(user: &AppConfig) -> Self {
        let mut config = Self {
            layout: user.layout,
            keys: user.clone(),
            ..Self::default()
        };
        if let Some(dir) = &user.assets_dir {
            config.assets_dir = dir.clone();
        }
        config
    }

    pub fn toolkit_config(&self) -> ToolkitConfig {
        ToolkitConfig {
            window_width: self.window_width,
            window_height: self.window_height,
            window_title: self.window_title.clone(),
            theme: self.theme,
            metrics: self.metrics,
            keys: self.keys.clone(),
        }
    }

    pub fn title_font_path(&self) -> PathBuf {
        self.assets_dir.join("Roboto-Bold.ttf")
    }

    pub fn body_font_path(&self) -> PathBuf {
        self.assets_dir.join("Roboto-Regular.ttf")
    }

    pub fn logo_path(&self) -> PathBuf {
        self.assets_dir.join("logo.png")
    }

    /// Every asset path, in the order start-up loads them.
    pub fn asset_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.title_font_path(), self.body_font_path(), self.logo_path()];
        paths.extend(PROJECTS.iter().map(|p| p.image_path(&self.assets_dir)));
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn defaults_match_expected_actions() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)), Some(Action::ScrollDown));
        assert_eq!(config.match_key(key(KeyCode::Tab, KeyModifiers::NONE)), Some(Action::FocusNext));
        assert_eq!(config.match_key(key(KeyCode::BackTab, KeyModifiers::SHIFT)), Some(Action::FocusPrev));
        assert_eq!(config.match_key(key(KeyCode::Esc, KeyModifiers::NONE)), Some(Action::Quit));
        assert_eq!(config.match_key(key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn parses_overrides_and_ignores_noise() {
        let text = "\
# comment
[section]
layout = row
assets_dir = \"/srv/naox\"
quit = Ctrl+x, F10
scroll_down = nonsense+key
not_an_action = q
";
        let config = AppConfig::parse_config(text);
        assert_eq!(config.layout, LayoutStrategy::Row);
        assert_eq!(config.assets_dir, Some(PathBuf::from("/srv/naox")));
        assert_eq!(
            config.bindings[&Action::Quit],
            vec![
                KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL),
                KeyBind::new(KeyCode::F(10), KeyModifiers::NONE),
            ]
        );
        // Unparseable values keep the default binding.
        assert_eq!(config.bindings[&Action::ScrollDown], AppConfig::default_bindings()[&Action::ScrollDown]);
    }

    #[test]
    fn unknown_layout_keeps_default() {
        let config = AppConfig::parse_config("layout = spiral");
        assert_eq!(config.layout, LayoutStrategy::Grid);
    }

    #[test]
    fn serialised_config_parses_back_to_itself() {
        let mut config = AppConfig::default();
        config.layout = LayoutStrategy::Row;
        config.assets_dir = Some(PathBuf::from("/tmp/assets"));
        config.bindings.insert(
            Action::Activate,
            vec![KeyBind::new(KeyCode::Char('o'), KeyModifiers::ALT)],
        );
        assert_eq!(AppConfig::parse_config(&config.serialise()), config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/definitely/not/here/config.toml"));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn landing_defaults_and_user_overlay() {
        let defaults = LandingConfig::default();
        assert_eq!((defaults.window_width, defaults.window_height), (1440, 900));
        assert_eq!(defaults.window_title, "NaoX");
        assert_eq!(defaults.title_font_path(), PathBuf::from("assets/Roboto-Bold.ttf"));
        assert_eq!(defaults.body_font_path(), PathBuf::from("assets/Roboto-Regular.ttf"));
        assert_eq!(defaults.logo_path(), PathBuf::from("assets/logo.png"));

        let user = AppConfig {
            layout: LayoutStrategy::Row,
            assets_dir: Some(PathBuf::from("media")),
            ..AppConfig::default()
        };
        let merged = LandingConfig::with_user(&user);
        assert_eq!(merged.layout, LayoutStrategy::Row);
        assert_eq!(merged.logo_path(), PathBuf::from("media/logo.png"));
    }

    #[test]
    fn asset_paths_follow_load_order() {
        let paths = LandingConfig::default().asset_paths();
        assert_eq!(paths.len(), 9);
        assert_eq!(paths[2], PathBuf::from("assets/logo.png"));
        assert_eq!(paths[5], PathBuf::from("assets/projects/inner_breeze.png"));
        assert_eq!(paths[8], PathBuf::from("assets/projects/rocks.png"));
    }

    #[test]
    fn status_hint_lists_primary_keys() {
        let hint = AppConfig::default().status_bar_hint();
        assert!(hint.contains("↑/↓: scroll"));
        assert!(hint.contains("Tab: next link"));
        assert!(hint.contains("q: quit"));
    }
}
