use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille spinner driven by the animation tick counter.
pub struct Spinner<'a> {
    tick: u64,
    label: Option<&'a str>,
    style: Style,
}

impl<'a> Spinner<'a> {
    #[must_use]
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            label: None,
            style: Style::default().fg(Color::Cyan),
        }
    }

    #[must_use]
    pub const fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn frame(tick: u64) -> &'static str {
        // One frame every three ticks.
        let index = usize::try_from((tick / 3) % FRAMES.len() as u64).unwrap_or(0);
        FRAMES[index]
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(Self::frame(self.tick), self.style)];
        if let Some(label) = self.label {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(label, self.style));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
