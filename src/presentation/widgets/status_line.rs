//! Inline feedback line shown above page content.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Feedback severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

impl StatusLevel {
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }

    const fn marker(self) -> &'static str {
        match self {
            Self::Info => "ℹ",
            Self::Success => "✓",
            Self::Error => "✗",
        }
    }
}

/// A transient ok/error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, StatusLevel::Error)
    }
}

/// Renders an optional [`StatusMessage`]; nothing when absent.
pub struct StatusLine<'a> {
    message: Option<&'a StatusMessage>,
}

impl<'a> StatusLine<'a> {
    #[must_use]
    pub const fn new(message: Option<&'a StatusMessage>) -> Self {
        Self { message }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(message) = self.message else {
            return;
        };

        let mut style = Style::default().fg(message.level.color());
        if message.is_error() {
            style = style.add_modifier(Modifier::BOLD);
        }

        let line = Line::from(vec![
            Span::styled(format!(" {} ", message.level.marker()), style),
            Span::styled(message.text.as_str(), style),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
