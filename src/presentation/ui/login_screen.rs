//! Login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::presentation::widgets::{Spinner, StatusMessage, TextInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Input,
    Validating,
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    None,
    OpenBrowser,
    Submit,
    ForgetStoredSession,
}

/// Sign-in screen: browser OAuth, then paste the session cookie.
pub struct LoginScreen {
    cookie_input: TextInput,
    state: LoginState,
    error_message: Option<String>,
    notice: Option<StatusMessage>,
    persist_session: bool,
    login_url: String,
    tick: u64,
}

impl LoginScreen {
    #[must_use]
    pub fn new(login_url: impl Into<String>) -> Self {
        let mut cookie_input = TextInput::new("Session cookie")
            .password()
            .placeholder("Paste the session cookie here...");
        cookie_input.set_focused(true);

        Self {
            cookie_input,
            state: LoginState::Input,
            error_message: None,
            notice: None,
            persist_session: true,
            login_url: login_url.into(),
            tick: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// Entered cookie, if any.
    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        let value = self.cookie_input.value().trim();
        if value.is_empty() { None } else { Some(value) }
    }

    #[must_use]
    pub const fn should_persist(&self) -> bool {
        self.persist_session
    }

    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&StatusMessage> {
        self.notice.as_ref()
    }

    /// Message shown above the form until the next submit.
    pub fn set_notice(&mut self, notice: StatusMessage) {
        self.notice = Some(notice);
    }

    pub fn set_validating(&mut self) {
        self.state = LoginState::Validating;
        self.error_message = None;
        self.notice = None;
    }

    pub fn set_success(&mut self) {
        self.state = LoginState::Success;
        self.error_message = None;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error;
        self.error_message = Some(message.into());
    }

    pub fn reset(&mut self) {
        self.state = LoginState::Input;
        self.error_message = None;
    }

    pub fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    pub fn paste(&mut self, text: &str) {
        if self.state == LoginState::Input {
            self.cookie_input.insert_str(text.trim());
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.state == LoginState::Validating {
            return LoginAction::None;
        }

        if self.state == LoginState::Error {
            self.reset();
            return LoginAction::None;
        }

        match key.code {
            KeyCode::Enter => {
                if self.cookie().is_some() {
                    return LoginAction::Submit;
                }
            }
            KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return LoginAction::OpenBrowser;
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::ALT) => {
                return LoginAction::ForgetStoredSession;
            }
            KeyCode::Tab => {
                self.persist_session = !self.persist_session;
            }
            _ => {
                self.cookie_input.handle_key(key);
            }
        }

        LoginAction::None
    }

    fn status_line(&self) -> Line<'_> {
        match self.state {
            LoginState::Input => match &self.notice {
                Some(notice) => Line::styled(
                    notice.text.as_str(),
                    Style::default().fg(notice.level.color()),
                ),
                None => Line::from(vec![
                    Span::styled("Ctrl+G: Open browser", Style::default().fg(Color::DarkGray)),
                    Span::raw(" | "),
                    Span::styled("Enter: Sign in", Style::default().fg(Color::DarkGray)),
                    Span::raw(" | "),
                    Span::styled("Alt+D: Clear saved", Style::default().fg(Color::DarkGray)),
                    Span::raw(" | "),
                    Span::styled("Esc: Quit", Style::default().fg(Color::DarkGray)),
                ]),
            },
            LoginState::Validating => Line::from(vec![
                Span::styled(Spinner::frame(self.tick), Style::default().fg(Color::Cyan)),
                Span::styled(
                    " Checking session...",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]),
            LoginState::Error => {
                let msg = self.error_message.as_deref().unwrap_or("Unknown error");
                Line::styled(format!("Error: {msg}"), Style::default().fg(Color::Red))
            }
            LoginState::Success => {
                Line::styled("Signed in!", Style::default().fg(Color::Green))
            }
        }
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(15),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(72),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                " rotina ",
                Style::default().add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [title_area, _, url_area, _, input_area, _, persist_area, _, status_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        Paragraph::new("Continue with Google, then paste the session cookie.")
            .style(Style::default().fg(Color::White))
            .render(title_area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Sign-in URL: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.login_url.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]))
        .wrap(Wrap { trim: false })
        .render(url_area, buf);

        (&self.cookie_input).render(input_area, buf);

        let checkbox = if self.persist_session { "[x]" } else { "[ ]" };
        Paragraph::new(Line::from(vec![
            Span::styled(checkbox, Style::default().fg(Color::Yellow)),
            Span::raw(" Remember session (Tab to toggle)"),
        ]))
        .render(persist_area, buf);

        Paragraph::new(self.status_line()).render(status_area, buf);
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen() -> LoginScreen {
        LoginScreen::new("http://localhost:3000/api/auth/google/start")
    }

    #[test]
    fn test_initial_state() {
        let screen = screen();
        assert_eq!(screen.state(), LoginState::Input);
        assert!(screen.cookie().is_none());
        assert!(screen.should_persist());
    }

    #[test]
    fn test_typing() {
        let mut screen = screen();
        for c in "abc".chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }

        assert_eq!(screen.cookie(), Some("abc"));
    }

    #[test]
    fn test_toggle_persist() {
        let mut screen = screen();
        screen.handle_key(key(KeyCode::Tab));
        assert!(!screen.should_persist());

        screen.handle_key(key(KeyCode::Tab));
        assert!(screen.should_persist());
    }

    #[test]
    fn test_submit_requires_cookie() {
        let mut screen = screen();
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);

        screen.paste("  s%3Aabc \n");
        assert_eq!(screen.cookie(), Some("s%3Aabc"));
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::Submit);
    }

    #[test]
    fn test_browser_and_forget_actions() {
        let mut screen = screen();

        assert_eq!(
            screen.handle_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL)),
            LoginAction::OpenBrowser
        );
        assert_eq!(
            screen.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::ALT)),
            LoginAction::ForgetStoredSession
        );
        assert!(screen.cookie().is_none());
    }

    #[test]
    fn test_validating_ignores_keys() {
        let mut screen = screen();
        screen.paste("abc");
        screen.set_validating();

        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);
    }

    #[test]
    fn test_any_key_clears_error() {
        let mut screen = screen();
        screen.set_error("session rejected");
        screen.handle_key(key(KeyCode::Char('x')));

        assert_eq!(screen.state(), LoginState::Input);
        assert!(screen.cookie().is_none());
    }

    #[test]
    fn test_render_shows_login_url() {
        let screen = screen();
        let area = Rect::new(0, 0, 100, 20);
        let mut buf = Buffer::empty(area);
        (&screen).render(area, &mut buf);

        let rendered: String = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(rendered.contains("/api/auth/google/start"));
        assert!(rendered.contains("Remember session"));
    }
}
