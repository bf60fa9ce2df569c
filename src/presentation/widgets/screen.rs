//! Shell layout and content cards.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Regions of the authenticated shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub header: Rect,
    pub navbar: Rect,
    pub status: Rect,
    pub body: Rect,
    pub footer: Rect,
}

impl Screen {
    /// Splits `area` into header, navbar, status line, body and footer.
    #[must_use]
    pub fn layout(area: Rect) -> Self {
        let [header, navbar, _, status, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            header,
            navbar,
            status,
            body: body.inner(Margin::new(1, 0)),
            footer,
        }
    }
}

/// Bordered section with a title and a one-line description.
pub struct Card<'a> {
    title: &'a str,
    description: Option<&'a str>,
    accent: Color,
}

impl<'a> Card<'a> {
    #[must_use]
    pub const fn new(title: &'a str) -> Self {
        Self {
            title,
            description: None,
            accent: Color::Cyan,
        }
    }

    #[must_use]
    pub const fn description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub const fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }

    /// Draws the card and returns the content area below the description.
    pub fn render_frame(self, area: Rect, buf: &mut Buffer) -> Rect {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(self.accent)
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(description) = self.description else {
            return inner;
        };

        let [description_area, _, content] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner);

        Paragraph::new(Line::styled(
            description,
            Style::default().fg(Color::Gray),
        ))
        .render(description_area, buf);

        content
    }
}
