//! Home: the latest tasks and a quick-add form.

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{ListState, Paragraph, StatefulWidget, Widget},
};

use crate::domain::entities::Task;
use crate::domain::keybinding::Action;
use crate::presentation::ui::page::{
    KeyOutcome, ModalOutcome, PageRequest, PageResult, RenderContext, TaskFeed, TaskForm,
};
use crate::presentation::widgets::{Card, StatusMessage, TaskList};

#[derive(Debug, Default)]
pub struct HomePage {
    feed: TaskFeed,
    form: Option<TaskForm>,
    message: Option<StatusMessage>,
    list_state: ListState,
}

impl HomePage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests issued when the page is mounted.
    pub fn mount(&mut self) -> Vec<PageRequest> {
        vec![self.feed.begin_load()]
    }

    #[must_use]
    pub fn captures_input(&self) -> bool {
        self.form.is_some()
    }

    #[must_use]
    pub const fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.feed.tasks
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let Some(form) = self.form.as_mut() else {
            return KeyOutcome::Ignored;
        };

        match form.handle_key(key) {
            ModalOutcome::Pending => KeyOutcome::Consumed,
            ModalOutcome::Cancel => {
                self.form = None;
                KeyOutcome::Consumed
            }
            ModalOutcome::Submit(title) => {
                form.set_saving(true);
                KeyOutcome::Request(PageRequest::AddTask(title.into_inner()))
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) -> KeyOutcome {
        match action {
            Action::NewTask => {
                self.message = None;
                self.form = Some(TaskForm::new_task());
                KeyOutcome::Consumed
            }
            Action::Refresh => KeyOutcome::Request(self.feed.begin_load()),
            _ => KeyOutcome::Ignored,
        }
    }

    /// Applies a worker result; may ask for a follow-up request.
    pub fn apply(&mut self, result: PageResult) -> Option<PageRequest> {
        match result {
            PageResult::TasksLoaded(result) => {
                if let Some(error) = self.feed.finish_load(result) {
                    self.message = Some(StatusMessage::error(error));
                }
                None
            }
            PageResult::TaskAdded(result) => {
                self.form = None;
                match result {
                    Ok(_) => {
                        self.message = Some(StatusMessage::success("Task created."));
                        Some(self.feed.begin_load())
                    }
                    Err(e) => {
                        self.message = Some(StatusMessage::error(e.to_string()));
                        None
                    }
                }
            }
            _ => None,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let [quick_area, list_area] =
            Layout::vertical([Constraint::Length(5), Constraint::Fill(1)]).areas(area);

        let content = Card::new("Quick add")
            .description("Create a task in seconds.")
            .render_frame(quick_area, buf);
        Paragraph::new(Line::from(vec![
            Span::styled(" n ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::styled(" + New task", Style::default().fg(Color::Cyan)),
        ]))
        .render(content, buf);

        let limit = ctx.home_list_limit.min(self.feed.tasks.len());
        TaskList::new(&self.feed.tasks[..limit])
            .loading(self.feed.loading && self.feed.tasks.is_empty(), ctx.tick)
            .timestamp_format(ctx.timestamp_format)
            .render(list_area, buf, &mut self.list_state);

        if let Some(form) = &self.form {
            form.render(area, buf, ctx.tick);
        }
    }
}
