//! Building blocks shared by the shell pages.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::domain::entities::{Task, TaskId, TaskStatus, TaskTitle};
use crate::domain::errors::ApiError;
use crate::domain::navigation::Page;
use crate::presentation::widgets::{Modal, Spinner, TextInput};

/// One mounted instance of a page.
///
/// Results are addressed to a ticket; a result whose ticket no longer
/// matches the mounted page is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub page: Page,
    pub mount: u64,
}

/// I/O a page asks the backend worker to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    ListTasks,
    AddTask(String),
    RenameTask { id: TaskId, title: String },
    SetStatus { id: TaskId, status: TaskStatus },
    DeleteTask(TaskId),
}

/// Worker answer to a [`PageRequest`].
#[derive(Debug)]
pub enum PageResult {
    TasksLoaded(Result<Vec<Task>, ApiError>),
    TaskAdded(Result<Task, ApiError>),
    TaskRenamed {
        id: TaskId,
        result: Result<Task, ApiError>,
    },
    TaskStatusChanged {
        id: TaskId,
        result: Result<Task, ApiError>,
    },
    TaskDeleted {
        id: TaskId,
        result: Result<TaskId, ApiError>,
    },
}

/// What a page did with a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Consumed,
    Request(PageRequest),
}

/// Per-frame values the pages render with.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub tick: u64,
    pub timestamp_format: &'a str,
    pub home_list_limit: usize,
}

/// The task list a page fetched, with its loading state.
#[derive(Debug, Default)]
pub struct TaskFeed {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TaskFeed {
    /// Marks a fetch as started. Existing tasks stay visible until it resolves.
    pub fn begin_load(&mut self) -> PageRequest {
        self.loading = true;
        PageRequest::ListTasks
    }

    /// Stores a fetch result. Returns the error message on failure.
    pub fn finish_load(&mut self, result: Result<Vec<Task>, ApiError>) -> Option<String> {
        self.loading = false;
        match result {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
                None
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(message.clone());
                Some(message)
            }
        }
    }

    /// Replaces the task with the same id.
    pub fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id() == task.id()) {
            *slot = task;
        }
    }

    pub fn remove(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id() != id);
    }
}

/// Result of a key press inside a modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome<T> {
    Pending,
    Cancel,
    Submit(T),
}

/// Title form used for both new and edited tasks.
#[derive(Debug)]
pub struct TaskForm {
    input: TextInput,
    target: Option<TaskId>,
    saving: bool,
}

impl TaskForm {
    #[must_use]
    pub fn new_task() -> Self {
        let mut input =
            TextInput::new("Title").placeholder("e.g. Workout, Study, Read 20 pages");
        input.set_focused(true);
        Self {
            input,
            target: None,
            saving: false,
        }
    }

    /// Form prefilled with the current title of `task`.
    #[must_use]
    pub fn edit(task: &Task) -> Self {
        let mut form = Self::new_task();
        form.input.set_value(task.title());
        form.target = Some(task.id());
        form
    }

    #[must_use]
    pub const fn target(&self) -> Option<TaskId> {
        self.target
    }

    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    #[must_use]
    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Enter submits the trimmed title; a blank title submits nothing.
    pub fn handle_key(&mut self, key: KeyEvent) -> ModalOutcome<TaskTitle> {
        if self.saving {
            return ModalOutcome::Pending;
        }

        match key.code {
            KeyCode::Esc => ModalOutcome::Cancel,
            KeyCode::Enter => TaskTitle::parse(self.input.value())
                .map_or(ModalOutcome::Pending, ModalOutcome::Submit),
            _ => {
                self.input.handle_key(key);
                ModalOutcome::Pending
            }
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, tick: u64) {
        let title = if self.target.is_some() {
            "Edit task"
        } else {
            "New task"
        };
        let inner = Modal::new(title).size(56, 8).render_frame(area, buf);

        let [input_area, _, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        (&self.input).render(input_area, buf);

        if self.saving {
            Spinner::new(tick).label("Saving...").render(hint_area, buf);
        } else {
            Paragraph::new(Line::from(vec![
                Span::styled(" Enter ", Style::default().fg(Color::Black).bg(Color::Cyan)),
                Span::raw(" Save  "),
                Span::styled(" Esc ", Style::default().fg(Color::White).bg(Color::DarkGray)),
                Span::raw(" Close"),
            ]))
            .render(hint_area, buf);
        }
    }
}

/// Delete confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmDelete {
    id: TaskId,
    title: String,
}

impl ConfirmDelete {
    #[must_use]
    pub fn new(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_string(),
        }
    }

    pub fn handle_key(&self, key: KeyEvent) -> ModalOutcome<TaskId> {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => ModalOutcome::Submit(self.id),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => ModalOutcome::Cancel,
            _ => ModalOutcome::Pending,
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let inner = Modal::new("Remove task")
            .size(50, 7)
            .border(Color::Red)
            .render_frame(area, buf);

        Paragraph::new(vec![
            Line::from("Remove this task?"),
            Line::styled(
                format!("“{}”", self.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::styled("y confirm · n cancel", Style::default().fg(Color::DarkGray)),
        ])
        .wrap(Wrap { trim: true })
        .render(inner, buf);
    }
}

/// Moves a list selection by `delta` within `len` rows.
#[must_use]
pub fn step_selection(current: Option<usize>, len: usize, delta: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0).min(len - 1);
    Some(current.saturating_add_signed(delta).min(len - 1))
}
