//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::application::dto::{SessionSource, SignInRequest};
use crate::application::use_cases::ResolveSessionUseCase;
use crate::domain::entities::User;
use crate::domain::keybinding::Keymap;
use crate::domain::navigation::Page;
use crate::domain::ports::{RoutinesPort, SessionPort, SessionStoragePort};
use crate::infrastructure::BrowserLauncher;
use crate::infrastructure::config::UiConfig;
use crate::presentation::events::{EventHandler, InputEvent};
use crate::presentation::ui::backend::{Action, Backend, BackendCommand, CommandHandler};
use crate::presentation::ui::login_screen::{LoginAction, LoginScreen};
use crate::presentation::ui::page::{PageRequest, PageTicket, RenderContext};
use crate::presentation::ui::shell::{Shell, ShellEvent};
use crate::presentation::ui::splash_screen::SplashScreen;
use crate::presentation::widgets::StatusMessage;

const ANIMATION_TICK_RATE: Duration = Duration::from_millis(33);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Loading,
    Unauthenticated,
    Authenticated,
    Exiting,
}

enum CurrentScreen {
    Splash(SplashScreen),
    Login(LoginScreen),
    Shell(Box<Shell>),
}

/// Startup result held until the splash outro finishes.
struct StartupOutcome {
    user: Option<User>,
    notice: Option<StatusMessage>,
}

pub struct App {
    state: AppState,
    screen: CurrentScreen,
    ui: UiConfig,
    keymap: Keymap,
    version: String,
    session_port: Arc<dyn SessionPort>,
    resolve_session_use_case: ResolveSessionUseCase,
    browser: BrowserLauncher,
    command_tx: mpsc::UnboundedSender<BackendCommand>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    backend: Option<Backend>,
    pending_startup: Option<StartupOutcome>,
    next_mount: u64,
    tick: u64,
}

impl App {
    #[must_use]
    pub fn new(
        session_port: Arc<dyn SessionPort>,
        routines: Arc<dyn RoutinesPort>,
        storage_port: Arc<dyn SessionStoragePort>,
        ui: UiConfig,
    ) -> Self {
        let resolve_session_use_case = ResolveSessionUseCase::new(storage_port.clone());
        let handler = CommandHandler::new(session_port.clone(), routines, storage_port);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            state: AppState::Loading,
            screen: CurrentScreen::Splash(SplashScreen::new(ui.enable_animations)),
            ui,
            keymap: Keymap::default(),
            version: format!("v{}", crate::VERSION),
            session_port,
            resolve_session_use_case,
            browser: BrowserLauncher::new(),
            command_tx,
            action_rx,
            backend: Some(Backend::new(handler, command_rx, action_tx)),
            pending_startup: None,
            next_mount: 0,
            tick: 0,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        cli_session: Option<String>,
    ) -> color_eyre::Result<()> {
        if let Some(backend) = self.backend.take() {
            tokio::spawn(backend.run());
        }

        self.start(cli_session).await;
        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    /// Validates a stored or supplied cookie, or asks the server whether a
    /// session already exists.
    async fn start(&mut self, cli_session: Option<String>) {
        match self.resolve_session_use_case.execute(cli_session).await {
            Some(resolved) => {
                info!(source = %resolved.source, "Found existing session");
                let request =
                    SignInRequest::new(resolved.cookie.as_str().to_string(), resolved.source);
                let request = if resolved.source == SessionSource::Keyring {
                    request.without_persistence()
                } else {
                    request
                };
                self.send(BackendCommand::SignIn(request));
            }
            None => self.send(BackendCommand::CheckSession),
        }
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut animation_interval = interval(ANIMATION_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            let terminal_event = terminal_events.next();

            tokio::select! {
                biased;

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = animation_interval.tick() => {
                    self.on_tick();
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_event => {
                    if let Some(input) = EventHandler::translate(event) {
                        self.handle_input(input);
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        Ok(())
    }

    fn send(&self, command: BackendCommand) {
        send_command(&self.command_tx, command);
    }

    fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if let CurrentScreen::Splash(splash) = &mut self.screen {
            splash.tick(ANIMATION_TICK_RATE);
        }
        self.complete_startup_if_ready();
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        match &mut self.screen {
            CurrentScreen::Splash(splash) => {
                frame.render_widget(splash, area);
            }
            CurrentScreen::Login(login) => {
                login.set_tick(self.tick);
                frame.render_widget(&*login, area);
            }
            CurrentScreen::Shell(shell) => {
                let ctx = RenderContext {
                    tick: self.tick,
                    timestamp_format: &self.ui.timestamp_format,
                    home_list_limit: self.ui.home_list_limit,
                };
                shell.render(area, frame.buffer_mut(), &ctx, &self.version);
            }
        }
    }

    fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Paste(text) => {
                if let CurrentScreen::Login(login) = &mut self.screen {
                    login.paste(&text);
                }
            }
            InputEvent::Resize => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match &mut self.screen {
            CurrentScreen::Splash(_) => {
                if EventHandler::is_quit_event(&key) {
                    self.state = AppState::Exiting;
                }
            }
            CurrentScreen::Login(login) => {
                if EventHandler::is_quit_event(&key) {
                    self.state = AppState::Exiting;
                    return;
                }
                match login.handle_key(key) {
                    LoginAction::None => {}
                    LoginAction::OpenBrowser => {
                        let url = self.session_port.login_url();
                        self.browser.open(url);
                        login.set_notice(StatusMessage::info(
                            "Browser opened. Paste the session cookie once signed in.",
                        ));
                    }
                    LoginAction::Submit => {
                        let Some(cookie) = login.cookie().map(str::to_string) else {
                            return;
                        };
                        let mut request = SignInRequest::new(cookie, SessionSource::UserInput);
                        if !login.should_persist() {
                            request = request.without_persistence();
                        }
                        login.set_validating();
                        send_command(&self.command_tx, BackendCommand::SignIn(request));
                    }
                    LoginAction::ForgetStoredSession => {
                        send_command(&self.command_tx, BackendCommand::ForgetStoredSession);
                    }
                }
            }
            CurrentScreen::Shell(shell) => match shell.handle_key(key) {
                ShellEvent::Nothing => {}
                ShellEvent::Quit => self.state = AppState::Exiting,
                ShellEvent::Logout => {
                    info!("Signing out");
                    send_command(&self.command_tx, BackendCommand::Logout);
                }
                ShellEvent::Navigate(page) => self.navigate(page),
                ShellEvent::Request(request) => {
                    let ticket = shell.ticket();
                    send_page_requests(&self.command_tx, ticket, vec![request]);
                }
            },
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::SessionChecked(user) => {
                if self.state == AppState::Loading {
                    self.finish_startup(StartupOutcome { user, notice: None });
                }
            }
            Action::SignInSucceeded(response) => {
                info!(user = %response.user.display_name(), source = %response.source, "Signed in");
                if self.state == AppState::Loading {
                    self.finish_startup(StartupOutcome {
                        user: Some(response.user),
                        notice: None,
                    });
                } else if let CurrentScreen::Login(login) = &mut self.screen {
                    login.set_success();
                    self.enter_shell(response.user);
                }
            }
            Action::SignInFailed(error) => {
                if self.state == AppState::Loading {
                    self.finish_startup(StartupOutcome {
                        user: None,
                        notice: Some(StatusMessage::error(format!(
                            "Saved session could not be used ({error}). Sign in again."
                        ))),
                    });
                } else if let CurrentScreen::Login(login) = &mut self.screen {
                    login.set_error(error.to_string());
                }
            }
            Action::StoredSessionForgotten(result) => {
                if let CurrentScreen::Login(login) = &mut self.screen {
                    login.set_notice(match result {
                        Ok(()) => StatusMessage::success("Saved session removed."),
                        Err(e) => StatusMessage::error(e.to_string()),
                    });
                }
            }
            Action::LoggedOut(outcome) => {
                if !outcome.server_acknowledged {
                    warn!("Server did not acknowledge logout; local session cleared");
                }
                self.go_to_login(Some(StatusMessage::info("Signed out.")));
            }
            Action::Page { ticket, result } => {
                if let CurrentScreen::Shell(shell) = &mut self.screen
                    && let Some(request) = shell.apply(ticket, result)
                {
                    send_page_requests(&self.command_tx, shell.ticket(), vec![request]);
                }
            }
        }
    }

    fn finish_startup(&mut self, outcome: StartupOutcome) {
        self.pending_startup = Some(outcome);
        if let CurrentScreen::Splash(splash) = &mut self.screen {
            splash.set_data_ready();
        }
        self.complete_startup_if_ready();
    }

    fn complete_startup_if_ready(&mut self) {
        let ready = matches!(&self.screen, CurrentScreen::Splash(splash) if splash.is_complete());
        if !ready {
            return;
        }
        let Some(outcome) = self.pending_startup.take() else {
            return;
        };

        match outcome.user {
            Some(user) => self.enter_shell(user),
            None => self.go_to_login(outcome.notice),
        }
    }

    fn enter_shell(&mut self, user: User) {
        debug!(user_id = %user.id(), "Entering shell");
        self.state = AppState::Authenticated;
        self.screen = CurrentScreen::Shell(Box::new(Shell::new(user, self.keymap.clone())));
        self.navigate(Page::Home);
    }

    fn go_to_login(&mut self, notice: Option<StatusMessage>) {
        self.state = AppState::Unauthenticated;
        let mut login = LoginScreen::new(self.session_port.login_url());
        if let Some(notice) = notice {
            login.set_notice(notice);
        }
        self.screen = CurrentScreen::Login(login);
    }

    /// Mounts a fresh instance of `page`; results for the previous mount are dropped.
    fn navigate(&mut self, page: Page) {
        let CurrentScreen::Shell(shell) = &mut self.screen else {
            return;
        };
        self.next_mount += 1;
        let ticket = PageTicket {
            page,
            mount: self.next_mount,
        };
        let requests = shell.mount(ticket);
        send_page_requests(&self.command_tx, ticket, requests);
    }
}

fn send_command(tx: &mpsc::UnboundedSender<BackendCommand>, command: BackendCommand) {
    if tx.send(command).is_err() {
        warn!("Backend worker is gone; command dropped");
    }
}

fn send_page_requests(
    tx: &mpsc::UnboundedSender<BackendCommand>,
    ticket: PageTicket,
    requests: Vec<PageRequest>,
) {
    for request in requests {
        send_command(tx, BackendCommand::Page { ticket, request });
    }
}
