use crate::domain::entities::User;
use crate::domain::navigation::Page;
use crate::presentation::widgets::Spinner;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub struct HeaderBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub title: Style,
    pub hint: Style,
    pub avatar: Style,
    pub user_name: Style,
    pub logout: Style,
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            hint: Style::default().fg(Color::DarkGray),
            avatar: Style::default()
                .bg(Color::Magenta)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            user_name: Style::default().fg(Color::White),
            logout: Style::default().fg(Color::Black).bg(Color::DarkGray),
        }
    }
}

/// Page title on the left, signed-in user and logout affordance on the right.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    page: Page,
    user: Option<&'a User>,
    logout_busy: bool,
    tick: u64,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(app_name: &'a str, page: Page) -> Self {
        Self {
            app_name,
            page,
            user: None,
            logout_busy: false,
            tick: 0,
            style: HeaderBarStyle::default(),
        }
    }

    #[must_use]
    pub const fn user(mut self, user: Option<&'a User>) -> Self {
        self.user = user;
        self
    }

    /// Replaces the logout label with a spinner.
    #[must_use]
    pub const fn logout_busy(mut self, busy: bool, tick: u64) -> Self {
        self.logout_busy = busy;
        self.tick = tick;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: HeaderBarStyle) -> Self {
        self.style = style;
        self
    }

    fn build_left_spans(&self) -> Vec<Span<'a>> {
        vec![
            Span::styled(
                format!(" {} ", self.app_name.to_uppercase()),
                self.style.app_name,
            ),
            Span::raw(" "),
            Span::styled(
                format!("{} {}", self.page.icon(), self.page.title()),
                self.style.title,
            ),
            Span::raw("  "),
            Span::styled(self.page.hint(), self.style.hint),
        ]
    }

    fn build_user_spans(&self, user: &'a User) -> Vec<Span<'a>> {
        let logout_label = if self.logout_busy {
            format!(" {} Signing out ", Spinner::frame(self.tick))
        } else {
            " Sign out (L) ".to_string()
        };

        vec![
            Span::styled(format!(" {} ", user.initial()), self.style.avatar),
            Span::raw(" "),
            Span::styled(user.display_name(), self.style.user_name),
            Span::raw(" "),
            Span::styled(logout_label, self.style.logout),
        ]
    }
}

fn spans_width(spans: &[Span<'_>]) -> u16 {
    let width: usize = spans.iter().map(|span| span.content.width()).sum();
    u16::try_from(width).unwrap_or(u16::MAX)
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)]
                .set_char(' ')
                .set_style(self.style.background);
        }

        let left_spans = self.build_left_spans();
        let left_width = spans_width(&left_spans);
        let left_area = Rect::new(area.x, area.y, left_width.min(area.width), 1);
        Paragraph::new(Line::from(left_spans)).render(left_area, buf);

        let Some(user) = self.user else {
            return;
        };

        let right_spans = self.build_user_spans(user);
        let right_width = spans_width(&right_spans);

        if right_width < area.width.saturating_sub(left_width.min(area.width / 2)) {
            let right_x = area.right().saturating_sub(right_width);
            let right_area = Rect::new(right_x, area.y, right_width, 1);
            Paragraph::new(Line::from(right_spans)).render(right_area, buf);
        }
    }
}
