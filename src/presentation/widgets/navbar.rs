use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

use crate::domain::navigation::Page;

/// The four pages, active one highlighted.
pub struct Navbar {
    active: Page,
}

impl Navbar {
    #[must_use]
    pub const fn new(active: Page) -> Self {
        Self { active }
    }

    fn labels() -> Vec<Line<'static>> {
        Page::ALL
            .iter()
            .map(|page| Line::from(format!("{} {} {}", page.index() + 1, page.icon(), page.title())))
            .collect()
    }
}

impl Widget for Navbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Tabs::new(Self::labels())
            .select(self.active.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .divider("│")
            .render(area, buf);
    }
}
