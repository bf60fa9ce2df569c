//! Completion progress.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::domain::entities::Task;
use crate::domain::keybinding::Action;
use crate::presentation::ui::page::{KeyOutcome, PageRequest, PageResult, RenderContext, TaskFeed};
use crate::presentation::widgets::{Card, Spinner, StatusMessage, TaskList};

/// Totals shown on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub total: usize,
    pub done: usize,
}

impl Progress {
    #[must_use]
    pub fn of(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            done: tasks.iter().filter(|t| t.status().is_done()).count(),
        }
    }

    #[must_use]
    pub const fn pending(self) -> usize {
        self.total - self.done
    }

    /// Completed share in `0.0..=1.0`; zero when there are no tasks.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

#[derive(Debug, Default)]
pub struct AchievementsPage {
    feed: TaskFeed,
    message: Option<StatusMessage>,
    list_state: ListState,
}

impl AchievementsPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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
    pub fn progress(&self) -> Progress {
        Progress::of(&self.feed.tasks)
    }

    pub fn handle_action(&mut self, action: Action) -> KeyOutcome {
        match action {
            Action::Refresh => KeyOutcome::Request(self.feed.begin_load()),
            _ => KeyOutcome::Ignored,
        }
    }

    pub fn apply(&mut self, result: PageResult) -> Option<PageRequest> {
        if let PageResult::TasksLoaded(result) = result {
            self.message = self.feed.finish_load(result).map(StatusMessage::error);
        }
        None
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let [summary_area, list_area] =
            Layout::vertical([Constraint::Length(7), Constraint::Fill(1)]).areas(area);

        let content = Card::new("Progress")
            .description("Completed routines out of everything you created.")
            .accent(Color::Magenta)
            .render_frame(summary_area, buf);

        if self.feed.loading && self.feed.tasks.is_empty() {
            Spinner::new(ctx.tick).label("Loading...").render(content, buf);
            return;
        }

        let progress = self.progress();
        let [gauge_area, counts_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
                .spacing(1)
                .areas(content);

        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Rgb(30, 41, 59)))
            .ratio(progress.ratio())
            .label(format!("{}/{} done", progress.done, progress.total))
            .render(gauge_area, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("[x] ", Style::default().fg(Color::Green)),
            Span::styled(
                progress.done.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" done   "),
            Span::styled("[ ] ", Style::default().fg(Color::Yellow)),
            Span::styled(
                progress.pending().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" pending"),
        ]))
        .render(counts_area, buf);

        let done: Vec<Task> = self
            .feed
            .tasks
            .iter()
            .filter(|t| t.status().is_done())
            .cloned()
            .collect();
        TaskList::new(&done)
            .title("Completed", "Most recent first.")
            .empty_text("Nothing completed yet.")
            .timestamp_format(ctx.timestamp_format)
            .render(list_area, buf, &mut self.list_state);
    }
}
