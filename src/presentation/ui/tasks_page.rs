//! Tasks: the full list with edit, remove and status toggle.

use std::collections::HashSet;

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{ListState, StatefulWidget},
};

use crate::domain::entities::{Task, TaskId, TaskStatus};
use crate::domain::keybinding::Action;
use crate::presentation::ui::page::{
    ConfirmDelete, KeyOutcome, ModalOutcome, PageRequest, PageResult, RenderContext, TaskFeed,
    TaskForm, step_selection,
};
use crate::presentation::widgets::{StatusMessage, TaskList};

#[derive(Debug)]
enum TasksModal {
    Form(TaskForm),
    Confirm(ConfirmDelete),
}

#[derive(Debug, Default)]
pub struct TasksPage {
    feed: TaskFeed,
    modal: Option<TasksModal>,
    busy: HashSet<TaskId>,
    message: Option<StatusMessage>,
    list_state: ListState,
}

impl TasksPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self) -> Vec<PageRequest> {
        vec![self.feed.begin_load()]
    }

    #[must_use]
    pub fn captures_input(&self) -> bool {
        self.modal.is_some()
    }

    #[must_use]
    pub const fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.feed.tasks
    }

    #[must_use]
    pub fn is_busy(&self, id: TaskId) -> bool {
        self.busy.contains(&id)
    }

    /// Selected task that has no request in flight.
    fn selected_idle(&self) -> Option<&Task> {
        self.list_state
            .selected()
            .and_then(|index| self.feed.tasks.get(index))
            .filter(|task| !self.busy.contains(&task.id()))
    }

    fn mark_busy(&mut self, id: TaskId, request: PageRequest) -> KeyOutcome {
        self.message = None;
        self.busy.insert(id);
        KeyOutcome::Request(request)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match self.modal.as_mut() {
            None => KeyOutcome::Ignored,
            Some(TasksModal::Form(form)) => match form.handle_key(key) {
                ModalOutcome::Pending => KeyOutcome::Consumed,
                ModalOutcome::Cancel => {
                    self.modal = None;
                    KeyOutcome::Consumed
                }
                ModalOutcome::Submit(title) => match form.target() {
                    Some(id) => {
                        self.modal = None;
                        self.mark_busy(
                            id,
                            PageRequest::RenameTask {
                                id,
                                title: title.into_inner(),
                            },
                        )
                    }
                    None => {
                        form.set_saving(true);
                        KeyOutcome::Request(PageRequest::AddTask(title.into_inner()))
                    }
                },
            },
            Some(TasksModal::Confirm(confirm)) => match confirm.handle_key(key) {
                ModalOutcome::Pending => KeyOutcome::Consumed,
                ModalOutcome::Cancel => {
                    self.modal = None;
                    KeyOutcome::Consumed
                }
                ModalOutcome::Submit(id) => {
                    self.modal = None;
                    self.mark_busy(id, PageRequest::DeleteTask(id))
                }
            },
        }
    }

    pub fn handle_action(&mut self, action: Action) -> KeyOutcome {
        match action {
            Action::NavigateUp | Action::NavigateDown => {
                let delta = if action == Action::NavigateUp { -1 } else { 1 };
                let next = step_selection(
                    self.list_state.selected(),
                    self.feed.tasks.len(),
                    delta,
                );
                self.list_state.select(next);
                KeyOutcome::Consumed
            }
            Action::NewTask => {
                self.message = None;
                self.modal = Some(TasksModal::Form(TaskForm::new_task()));
                KeyOutcome::Consumed
            }
            Action::EditTask => {
                let Some(task) = self.selected_idle() else {
                    return KeyOutcome::Ignored;
                };
                self.modal = Some(TasksModal::Form(TaskForm::edit(task)));
                KeyOutcome::Consumed
            }
            Action::DeleteTask => {
                let Some(task) = self.selected_idle() else {
                    return KeyOutcome::Ignored;
                };
                self.modal = Some(TasksModal::Confirm(ConfirmDelete::new(task)));
                KeyOutcome::Consumed
            }
            Action::ToggleStatus => {
                let Some(task) = self.selected_idle() else {
                    return KeyOutcome::Ignored;
                };
                let id = task.id();
                let status = task.status().toggled();
                self.mark_busy(id, PageRequest::SetStatus { id, status })
            }
            Action::Refresh => KeyOutcome::Request(self.feed.begin_load()),
            _ => KeyOutcome::Ignored,
        }
    }

    pub fn apply(&mut self, result: PageResult) -> Option<PageRequest> {
        match result {
            PageResult::TasksLoaded(result) => {
                if let Some(error) = self.feed.finish_load(result) {
                    self.message = Some(StatusMessage::error(error));
                }
                self.clamp_selection();
                None
            }
            PageResult::TaskAdded(result) => {
                self.modal = None;
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
            PageResult::TaskRenamed { id, result } => {
                self.busy.remove(&id);
                self.message = Some(match result {
                    Ok(task) => {
                        self.feed.replace(task);
                        StatusMessage::success("Task updated.")
                    }
                    Err(e) => StatusMessage::error(e.to_string()),
                });
                None
            }
            PageResult::TaskStatusChanged { id, result } => {
                self.busy.remove(&id);
                self.message = Some(match result {
                    Ok(task) => {
                        let text = match task.status() {
                            TaskStatus::Done => "Marked as done.",
                            TaskStatus::Pending => "Marked as pending.",
                        };
                        self.feed.replace(task);
                        StatusMessage::success(text)
                    }
                    Err(e) => StatusMessage::error(e.to_string()),
                });
                None
            }
            PageResult::TaskDeleted { id, result } => {
                self.busy.remove(&id);
                self.message = Some(match result {
                    Ok(deleted) => {
                        self.feed.remove(deleted);
                        self.clamp_selection();
                        StatusMessage::success("Task removed.")
                    }
                    Err(e) => StatusMessage::error(e.to_string()),
                });
                None
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.feed.tasks.len();
        let next = match self.list_state.selected() {
            None if len > 0 => Some(0),
            current => step_selection(current, len, 0),
        };
        self.list_state.select(next);
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        TaskList::new(&self.feed.tasks)
            .title("My tasks", "Edit or remove directly.")
            .empty_text("No tasks yet. Press n to create one.")
            .loading(self.feed.loading && self.feed.tasks.is_empty(), ctx.tick)
            .busy(&self.busy)
            .timestamp_format(ctx.timestamp_format)
            .selectable()
            .render(area, buf, &mut self.list_state);

        match &self.modal {
            Some(TasksModal::Form(form)) => form.render(area, buf, ctx.tick),
            Some(TasksModal::Confirm(confirm)) => confirm.render(area, buf),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ApiError;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_page() -> TasksPage {
        let mut page = TasksPage::new();
        page.mount();
        page.apply(PageResult::TasksLoaded(Ok(vec![
            Task::new(1, "Treino", "2024-06-05T10:00:00", TaskStatus::Pending),
            Task::new(2, "Ler", "2024-06-04T10:00:00", TaskStatus::Done),
        ])));
        page
    }

    #[test]
    fn test_load_selects_first_row() {
        let page = loaded_page();
        assert_eq!(page.list_state.selected(), Some(0));
    }

    #[test]
    fn test_toggle_requests_opposite_status() {
        let mut page = loaded_page();

        let outcome = page.handle_action(Action::ToggleStatus);

        assert_eq!(
            outcome,
            KeyOutcome::Request(PageRequest::SetStatus {
                id: TaskId(1),
                status: TaskStatus::Done,
            })
        );
        assert!(page.is_busy(TaskId(1)));
    }

    #[test]
    fn test_busy_row_blocks_second_toggle() {
        let mut page = loaded_page();
        page.handle_action(Action::ToggleStatus);

        assert_eq!(page.handle_action(Action::ToggleStatus), KeyOutcome::Ignored);
        assert_eq!(page.handle_action(Action::DeleteTask), KeyOutcome::Ignored);
    }

    #[test]
    fn test_status_result_replaces_row_and_clears_busy() {
        let mut page = loaded_page();
        page.handle_action(Action::ToggleStatus);

        page.apply(PageResult::TaskStatusChanged {
            id: TaskId(1),
            result: Ok(Task::new(1, "Treino", "2024-06-05T10:00:00", TaskStatus::Done)),
        });

        assert!(!page.is_busy(TaskId(1)));
        assert_eq!(page.tasks()[0].status(), TaskStatus::Done);
    }

    #[test]
    fn test_edit_submits_rename() {
        let mut page = loaded_page();
        page.handle_action(Action::NavigateDown);
        page.handle_action(Action::EditTask);
        page.handle_key(key(KeyCode::Char('!')));

        let outcome = page.handle_key(key(KeyCode::Enter));

        assert_eq!(
            outcome,
            KeyOutcome::Request(PageRequest::RenameTask {
                id: TaskId(2),
                title: "Ler!".to_string(),
            })
        );
        assert!(!page.captures_input());
    }

    #[test]
    fn test_blank_rename_keeps_form_open() {
        let mut page = loaded_page();
        page.handle_action(Action::EditTask);
        page.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));

        assert_eq!(page.handle_key(key(KeyCode::Enter)), KeyOutcome::Consumed);
        assert!(page.captures_input());
        assert!(!page.is_busy(TaskId(1)));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut page = loaded_page();
        page.handle_action(Action::DeleteTask);
        assert!(page.captures_input());

        page.handle_key(key(KeyCode::Char('n')));
        assert!(!page.captures_input());

        page.handle_action(Action::DeleteTask);
        let outcome = page.handle_key(key(KeyCode::Char('y')));
        assert_eq!(outcome, KeyOutcome::Request(PageRequest::DeleteTask(TaskId(1))));
    }

    #[test]
    fn test_delete_result_removes_row() {
        let mut page = loaded_page();
        page.handle_action(Action::NavigateDown);
        page.handle_action(Action::DeleteTask);
        page.handle_key(key(KeyCode::Enter));

        page.apply(PageResult::TaskDeleted {
            id: TaskId(2),
            result: Ok(TaskId(2)),
        });

        assert_eq!(page.tasks().len(), 1);
        assert_eq!(page.list_state.selected(), Some(0));
        assert_eq!(page.message().unwrap().text, "Task removed.");
    }

    #[test]
    fn test_failed_rename_keeps_title() {
        let mut page = loaded_page();
        page.apply(PageResult::TaskRenamed {
            id: TaskId(1),
            result: Err(ApiError::Http { status: 500 }),
        });

        assert_eq!(page.tasks()[0].title(), "Treino");
        assert!(page.message().unwrap().is_error());
    }
}
