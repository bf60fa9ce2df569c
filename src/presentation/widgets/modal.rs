use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

/// Centered popup frame drawn over the page.
pub struct Modal<'a> {
    title: &'a str,
    width: u16,
    height: u16,
    border: Color,
}

impl<'a> Modal<'a> {
    #[must_use]
    pub const fn new(title: &'a str) -> Self {
        Self {
            title,
            width: 56,
            height: 9,
            border: Color::Cyan,
        }
    }

    #[must_use]
    pub const fn size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub const fn border(mut self, color: Color) -> Self {
        self.border = color;
        self
    }

    /// Popup rectangle, clamped to `area`.
    #[must_use]
    pub fn area(&self, area: Rect) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(self.height.min(area.height))])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(self.width.min(area.width))])
            .flex(Flex::Center)
            .areas(row);
        popup
    }

    /// Clears the popup area, draws the frame and returns the inner area.
    pub fn render_frame(self, area: Rect, buf: &mut Buffer) -> Rect {
        let popup = self.area(area);
        Clear.render(popup, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.border))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(" Esc ✕ ").right_aligned());

        let inner = block.inner(popup);
        block.render(popup, buf);
        inner
    }
}
