use std::fmt::Write as _;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::keybinding::Keybind;

pub struct FooterBarStyle {
    pub badge: Style,
    pub editing_badge: Style,
    pub hint_label: Style,
    pub hint_key: Style,
    pub version: Style,
}

impl Default for FooterBarStyle {
    fn default() -> Self {
        Self {
            badge: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            editing_badge: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(Color::Gray),
            hint_key: Style::default().fg(Color::White).bg(Color::DarkGray),
            version: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Short label for a key chord, e.g. `C-g` or `Space`.
#[must_use]
pub fn key_label(key: &KeyEvent) -> String {
    let mut label = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        label.push_str("C-");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        label.push_str("A-");
    }

    match key.code {
        KeyCode::Char(' ') => label.push_str("Space"),
        KeyCode::Char(c) => label.push(c),
        KeyCode::Enter => label.push_str("Enter"),
        KeyCode::Esc => label.push_str("Esc"),
        KeyCode::Tab => label.push_str("Tab"),
        KeyCode::BackTab => label.push_str("S-Tab"),
        KeyCode::Up => label.push('↑'),
        KeyCode::Down => label.push('↓'),
        KeyCode::Left => label.push('←'),
        KeyCode::Right => label.push('→'),
        KeyCode::PageUp => label.push_str("PgUp"),
        KeyCode::PageDown => label.push_str("PgDn"),
        other => {
            let _ = write!(label, "{other:?}");
        }
    }
    label
}

/// Bottom line: mode badge, key hints for the active page and the version.
pub struct FooterBar<'a> {
    mode: &'a str,
    editing: bool,
    hints: &'a [Keybind],
    version: Option<&'a str>,
    style: FooterBarStyle,
}

impl<'a> FooterBar<'a> {
    #[must_use]
    pub fn new(mode: &'a str, hints: &'a [Keybind]) -> Self {
        Self {
            mode,
            editing: false,
            hints,
            version: None,
            style: FooterBarStyle::default(),
        }
    }

    /// While a form owns the keyboard the page hints do not apply.
    #[must_use]
    pub const fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    #[must_use]
    pub const fn version(mut self, version: Option<&'a str>) -> Self {
        self.version = version;
        self
    }

    fn spans(&self) -> Vec<Span<'_>> {
        if self.editing {
            return vec![
                Span::styled(" EDIT ", self.style.editing_badge),
                Span::raw(" "),
                Span::styled(" Enter ", self.style.hint_key),
                Span::styled(" confirm  ", self.style.hint_label),
                Span::styled(" Esc ", self.style.hint_key),
                Span::styled(" cancel", self.style.hint_label),
            ];
        }

        let mut spans = vec![Span::styled(
            format!(" {} ", self.mode.to_uppercase()),
            self.style.badge,
        )];
        for hint in self.hints.iter().filter(|k| k.visible_in_bar) {
            let key = hint
                .key_display
                .as_deref()
                .map_or_else(|| key_label(&hint.key), ToString::to_string);
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!(" {key} "), self.style.hint_key));
            spans.push(Span::styled(format!(" {}", hint.label), self.style.hint_label));
        }
        spans
    }
}

impl Widget for FooterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let version_width = self
            .version
            .map_or(0, |v| u16::try_from(v.width()).unwrap_or(u16::MAX));
        let hints_width = area.width.saturating_sub(version_width + 1);

        Paragraph::new(Line::from(self.spans()))
            .render(Rect::new(area.x, area.y, hints_width, 1), buf);

        if let Some(version) = self.version
            && version_width < area.width
        {
            let x = area.right().saturating_sub(version_width);
            Paragraph::new(Span::styled(version, self.style.version))
                .render(Rect::new(x, area.y, version_width, 1), buf);
        }
    }
}
