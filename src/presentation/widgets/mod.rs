mod calendar_grid;
mod footer_bar;
mod header_bar;
mod input;
mod modal;
mod navbar;
mod screen;
mod spinner;
mod status_line;
mod task_list;

pub use calendar_grid::CalendarGrid;
pub use footer_bar::{FooterBar, FooterBarStyle, key_label};
pub use header_bar::{HeaderBar, HeaderBarStyle};
pub use input::TextInput;
pub use modal::Modal;
pub use navbar::Navbar;
pub use screen::{Card, Screen};
pub use spinner::Spinner;
pub use status_line::{StatusLevel, StatusLine, StatusMessage};
pub use task_list::{TaskList, format_timestamp};
