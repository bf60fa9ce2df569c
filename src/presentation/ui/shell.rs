//! Authenticated shell: chrome around the active page.

use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::debug;

use crate::domain::entities::User;
use crate::domain::keybinding::{Action, Keymap};
use crate::domain::navigation::Page;
use crate::presentation::events::EventHandler;
use crate::presentation::ui::achievements_page::AchievementsPage;
use crate::presentation::ui::home_page::HomePage;
use crate::presentation::ui::page::{
    KeyOutcome, PageRequest, PageResult, PageTicket, RenderContext,
};
use crate::presentation::ui::schedule_page::SchedulePage;
use crate::presentation::ui::tasks_page::TasksPage;
use crate::presentation::widgets::{FooterBar, HeaderBar, Navbar, Screen, StatusLine, StatusMessage};

/// The mounted page.
#[derive(Debug)]
pub enum ActivePage {
    Home(HomePage),
    Tasks(TasksPage),
    Schedule(SchedulePage),
    Achievements(AchievementsPage),
}

impl ActivePage {
    #[must_use]
    pub fn new(page: Page) -> Self {
        match page {
            Page::Home => Self::Home(HomePage::new()),
            Page::Tasks => Self::Tasks(TasksPage::new()),
            Page::Schedule => Self::Schedule(SchedulePage::new()),
            Page::Achievements => Self::Achievements(AchievementsPage::new()),
        }
    }

    fn mount(&mut self) -> Vec<PageRequest> {
        match self {
            Self::Home(p) => p.mount(),
            Self::Tasks(p) => p.mount(),
            Self::Schedule(p) => p.mount(),
            Self::Achievements(p) => p.mount(),
        }
    }

    fn captures_input(&self) -> bool {
        match self {
            Self::Home(p) => p.captures_input(),
            Self::Tasks(p) => p.captures_input(),
            Self::Schedule(p) => p.captures_input(),
            Self::Achievements(p) => p.captures_input(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match self {
            Self::Home(p) => p.handle_key(key),
            Self::Tasks(p) => p.handle_key(key),
            Self::Schedule(_) | Self::Achievements(_) => KeyOutcome::Ignored,
        }
    }

    fn handle_action(&mut self, action: Action) -> KeyOutcome {
        match self {
            Self::Home(p) => p.handle_action(action),
            Self::Tasks(p) => p.handle_action(action),
            Self::Schedule(p) => p.handle_action(action),
            Self::Achievements(p) => p.handle_action(action),
        }
    }

    fn apply(&mut self, result: PageResult) -> Option<PageRequest> {
        match self {
            Self::Home(p) => p.apply(result),
            Self::Tasks(p) => p.apply(result),
            Self::Schedule(p) => p.apply(result),
            Self::Achievements(p) => p.apply(result),
        }
    }

    fn message(&self) -> Option<&StatusMessage> {
        match self {
            Self::Home(p) => p.message(),
            Self::Tasks(p) => p.message(),
            Self::Schedule(p) => p.message(),
            Self::Achievements(p) => p.message(),
        }
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        match self {
            Self::Home(p) => p.render(area, buf, ctx),
            Self::Tasks(p) => p.render(area, buf, ctx),
            Self::Schedule(p) => p.render(area, buf, ctx),
            Self::Achievements(p) => p.render(area, buf, ctx),
        }
    }
}

/// What the app should do after a key press in the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Nothing,
    Quit,
    Logout,
    Navigate(Page),
    Request(PageRequest),
}

impl From<KeyOutcome> for ShellEvent {
    fn from(outcome: KeyOutcome) -> Self {
        match outcome {
            KeyOutcome::Request(request) => Self::Request(request),
            KeyOutcome::Ignored | KeyOutcome::Consumed => Self::Nothing,
        }
    }
}

#[derive(Debug)]
pub struct Shell {
    user: User,
    ticket: PageTicket,
    page: ActivePage,
    keymap: Keymap,
    logout_busy: bool,
}

impl Shell {
    /// Shell for `user`, not yet mounted. Call [`Shell::mount`] before use.
    #[must_use]
    pub fn new(user: User, keymap: Keymap) -> Self {
        Self {
            user,
            ticket: PageTicket {
                page: Page::Home,
                mount: 0,
            },
            page: ActivePage::new(Page::Home),
            keymap,
            logout_busy: false,
        }
    }

    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    #[must_use]
    pub const fn ticket(&self) -> PageTicket {
        self.ticket
    }

    #[must_use]
    pub const fn page(&self) -> &ActivePage {
        &self.page
    }

    /// Replaces the page with a fresh instance and returns its load requests.
    pub fn mount(&mut self, ticket: PageTicket) -> Vec<PageRequest> {
        debug!(page = ?ticket.page, mount = ticket.mount, "Mounting page");
        self.ticket = ticket;
        self.page = ActivePage::new(ticket.page);
        self.page.mount()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ShellEvent {
        if EventHandler::is_interrupt(&key) {
            return ShellEvent::Quit;
        }

        if self.page.captures_input() {
            return self.page.handle_key(key).into();
        }

        let current = self.ticket.page;
        let Some(action) = self.keymap.action_for(current, &key) else {
            return ShellEvent::Nothing;
        };

        match action {
            Action::Quit => ShellEvent::Quit,
            Action::Logout => {
                if self.logout_busy {
                    return ShellEvent::Nothing;
                }
                self.logout_busy = true;
                ShellEvent::Logout
            }
            Action::NextPage => ShellEvent::Navigate(current.next()),
            Action::PreviousPage => ShellEvent::Navigate(current.previous()),
            Action::GoTo(page) if page != current => ShellEvent::Navigate(page),
            Action::GoTo(_) => ShellEvent::Nothing,
            other => self.page.handle_action(other).into(),
        }
    }

    /// Routes a worker result to the page it was issued for.
    pub fn apply(&mut self, ticket: PageTicket, result: PageResult) -> Option<PageRequest> {
        if ticket != self.ticket {
            debug!(page = ?ticket.page, mount = ticket.mount, "Dropping result for unmounted page");
            return None;
        }
        self.page.apply(result)
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>, version: &str) {
        let screen = Screen::layout(area);
        let page = self.ticket.page;

        HeaderBar::new(crate::NAME, page)
            .user(Some(&self.user))
            .logout_busy(self.logout_busy, ctx.tick)
            .render(screen.header, buf);
        Navbar::new(page).render(screen.navbar, buf);
        StatusLine::new(self.page.message()).render(screen.status, buf);

        self.page.render(screen.body, buf, ctx);

        let hints = self.keymap.hints(page);
        FooterBar::new(page.title(), &hints)
            .editing(self.page.captures_input())
            .version(Some(version))
            .render(screen.footer, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Task, TaskStatus};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shell() -> Shell {
        let user = User::new(1, "ana@example.com", Some("Ana".to_string()), None);
        let mut shell = Shell::new(user, Keymap::default());
        shell.mount(PageTicket {
            page: Page::Home,
            mount: 1,
        });
        shell
    }

    #[test]
    fn test_second_logout_is_suppressed() {
        let mut shell = shell();

        assert_eq!(shell.handle_key(key(KeyCode::Char('L'))), ShellEvent::Logout);
        assert_eq!(shell.handle_key(key(KeyCode::Char('L'))), ShellEvent::Nothing);
        assert!(shell.logout_busy);
    }

    #[test]
    fn test_navigation_keys() {
        let mut shell = shell();

        assert_eq!(
            shell.handle_key(key(KeyCode::Tab)),
            ShellEvent::Navigate(Page::Tasks)
        );
        assert_eq!(
            shell.handle_key(key(KeyCode::Char('3'))),
            ShellEvent::Navigate(Page::Schedule)
        );
        assert_eq!(shell.handle_key(key(KeyCode::Char('1'))), ShellEvent::Nothing);
    }

    #[test]
    fn test_open_form_swallows_global_keys() {
        let mut shell = shell();
        shell.handle_key(key(KeyCode::Char('n')));

        assert_eq!(shell.handle_key(key(KeyCode::Char('q'))), ShellEvent::Nothing);
        assert_eq!(shell.handle_key(key(KeyCode::Tab)), ShellEvent::Nothing);
        assert_eq!(
            shell.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ShellEvent::Quit
        );
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut shell = shell();
        let old = shell.ticket();
        shell.mount(PageTicket {
            page: Page::Home,
            mount: 2,
        });

        let follow_up = shell.apply(
            old,
            PageResult::TasksLoaded(Ok(vec![Task::new(
                1,
                "Treino",
                "2024-06-05T10:00:00",
                TaskStatus::Pending,
            )])),
        );

        assert!(follow_up.is_none());
        match shell.page() {
            ActivePage::Home(home) => assert!(home.tasks().is_empty()),
            other => panic!("unexpected page: {other:?}"),
        }
    }

    #[test]
    fn test_render_shows_chrome() {
        let mut shell = shell();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        let ctx = RenderContext {
            tick: 0,
            timestamp_format: "%d/%m/%Y",
            home_list_limit: 5,
        };
        shell.render(area, &mut buf, &ctx, "v0.1.0");

        let rendered: String = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(rendered.contains("Ana"));
        assert!(rendered.contains("Quick add"));
        assert!(rendered.contains("v0.1.0"));
    }
}
