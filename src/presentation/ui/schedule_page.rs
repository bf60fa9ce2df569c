//! Calendar of tasks grouped by creation day.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::domain::calendar::{CalendarState, count_by_day_in, tasks_on_day_in};
use crate::domain::entities::Task;
use crate::domain::keybinding::Action;
use crate::presentation::ui::page::{KeyOutcome, PageRequest, PageResult, RenderContext, TaskFeed};
use crate::presentation::widgets::{CalendarGrid, Card, Spinner, StatusMessage, TaskList};

#[derive(Debug)]
pub struct SchedulePage {
    feed: TaskFeed,
    calendar: CalendarState,
    counts: HashMap<NaiveDate, usize>,
    message: Option<StatusMessage>,
    list_state: ListState,
}

impl Default for SchedulePage {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulePage {
    #[must_use]
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    #[must_use]
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            feed: TaskFeed::default(),
            calendar: CalendarState::new(today),
            counts: HashMap::new(),
            message: None,
            list_state: ListState::default(),
        }
    }

    pub fn mount(&mut self) -> Vec<PageRequest> {
        vec![self.feed.begin_load()]
    }

    #[must_use]
    pub const fn captures_input(&self) -> bool {
        false
    }

    #[must_use]
    pub const fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    #[must_use]
    pub const fn calendar(&self) -> &CalendarState {
        &self.calendar
    }

    /// Tasks created on the selected day.
    #[must_use]
    pub fn selected_tasks(&self) -> Vec<Task> {
        tasks_on_day_in(&self.feed.tasks, self.calendar.selected(), &Local)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn handle_action(&mut self, action: Action) -> KeyOutcome {
        match action {
            Action::NavigateLeft => self.calendar.move_selection(-1),
            Action::NavigateRight => self.calendar.move_selection(1),
            Action::NavigateUp => self.calendar.move_selection(-7),
            Action::NavigateDown => self.calendar.move_selection(7),
            Action::PreviousMonth => self.calendar.previous_month(),
            Action::NextMonth => self.calendar.next_month(),
            Action::Today => self.calendar.go_to_today(),
            Action::Refresh => return KeyOutcome::Request(self.feed.begin_load()),
            _ => return KeyOutcome::Ignored,
        }
        self.list_state.select(None);
        KeyOutcome::Consumed
    }

    pub fn apply(&mut self, result: PageResult) -> Option<PageRequest> {
        if let PageResult::TasksLoaded(result) = result {
            self.message = self.feed.finish_load(result).map(StatusMessage::error);
            self.counts = count_by_day_in(&self.feed.tasks, &Local);
        }
        None
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let [calendar_area, day_area] =
            Layout::horizontal([Constraint::Length(44), Constraint::Fill(1)]).areas(area);

        let content = Card::new("Calendar")
            .description("Tasks by the day they were created.")
            .render_frame(calendar_area, buf);
        let grid = self.calendar.grid(&self.counts);
        CalendarGrid::new(self.calendar.view(), &grid).render(content, buf);

        let title = self.calendar.selected().format("%d/%m/%Y").to_string();

        if self.feed.loading && self.feed.tasks.is_empty() {
            let content = Card::new(&title)
                .description("Loading tasks for this day.")
                .render_frame(day_area, buf);
            Spinner::new(ctx.tick)
                .label("Loading calendar...")
                .render(content, buf);
            return;
        }

        if let Some(error) = &self.feed.error {
            let content = Card::new(&title)
                .description("Tasks could not be loaded.")
                .accent(Color::Red)
                .render_frame(day_area, buf);
            Paragraph::new(vec![
                Line::styled(error.as_str(), Style::default().fg(Color::Red)),
                Line::styled("Press r to retry.", Style::default().fg(Color::DarkGray)),
            ])
            .wrap(Wrap { trim: true })
            .render(content, buf);
            return;
        }

        let day_tasks = self.selected_tasks();
        let description = match day_tasks.len() {
            1 => "1 task created on this day.".to_string(),
            n => format!("{n} tasks created on this day."),
        };
        TaskList::new(&day_tasks)
            .title(&title, &description)
            .empty_text("No tasks created on this day.")
            .timestamp_format(ctx.timestamp_format)
            .render(day_area, buf, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TaskStatus;
    use crate::domain::errors::ApiError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loaded_page() -> SchedulePage {
        let mut page = SchedulePage::with_today(date(2024, 6, 5));
        page.mount();
        page.apply(PageResult::TasksLoaded(Ok(vec![
            Task::new(1, "Treino", "2024-06-05T10:00:00", TaskStatus::Pending),
            Task::new(2, "Ler", "2024-06-05T07:30:00", TaskStatus::Done),
            Task::new(3, "Correr", "2024-06-04T18:00:00", TaskStatus::Pending),
        ])));
        page
    }

    #[test]
    fn test_counts_by_creation_day() {
        let page = loaded_page();

        assert_eq!(page.counts.get(&date(2024, 6, 5)), Some(&2));
        assert_eq!(page.counts.get(&date(2024, 6, 4)), Some(&1));
    }

    #[test]
    fn test_selected_day_lists_its_tasks() {
        let mut page = loaded_page();
        assert_eq!(page.selected_tasks().len(), 2);

        page.handle_action(Action::NavigateLeft);

        assert_eq!(page.calendar().selected(), date(2024, 6, 4));
        assert_eq!(page.selected_tasks()[0].title(), "Correr");
    }

    #[test]
    fn test_week_navigation() {
        let mut page = loaded_page();
        page.handle_action(Action::NavigateDown);

        assert_eq!(page.calendar().selected(), date(2024, 6, 12));
    }

    #[test]
    fn test_today_returns_to_current_month_keeping_selection() {
        let mut page = loaded_page();
        page.handle_action(Action::NavigateLeft);
        page.handle_action(Action::NextMonth);
        page.handle_action(Action::NextMonth);
        page.handle_action(Action::Today);

        assert_eq!(page.calendar().view().month(), 6);
        assert_eq!(page.calendar().selected(), date(2024, 6, 4));
    }

    #[test]
    fn test_load_error_is_reported() {
        let mut page = SchedulePage::with_today(date(2024, 6, 5));
        page.mount();
        page.apply(PageResult::TasksLoaded(Err(ApiError::network("offline"))));

        assert!(page.message().unwrap().is_error());
    }

    #[test]
    fn test_refresh_requests_tasks() {
        let mut page = loaded_page();

        assert_eq!(
            page.handle_action(Action::Refresh),
            KeyOutcome::Request(PageRequest::ListTasks)
        );
    }
}
