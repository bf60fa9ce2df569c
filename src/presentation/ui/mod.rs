//! UI screens.

mod achievements_page;
mod app;
mod backend;
mod home_page;
mod login_screen;
mod page;
mod schedule_page;
mod shell;
mod splash_screen;
mod tasks_page;

pub use achievements_page::{AchievementsPage, Progress};
pub use app::App;
pub use backend::{Action, Backend, BackendCommand, CommandHandler};
pub use home_page::HomePage;
pub use login_screen::{LoginAction, LoginScreen, LoginState};
pub use page::{KeyOutcome, PageRequest, PageResult, PageTicket, RenderContext};
pub use schedule_page::SchedulePage;
pub use shell::{ActivePage, Shell, ShellEvent};
pub use splash_screen::SplashScreen;
pub use tasks_page::TasksPage;
