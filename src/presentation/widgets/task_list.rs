//! Task list card.

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::domain::entities::{Task, TaskId};
use crate::presentation::widgets::{Card, Spinner};

/// Formats a creation timestamp in local time, or returns it unchanged.
#[must_use]
pub fn format_timestamp(raw: &str, format: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.with_timezone(&Local).format(format).to_string();
    }
    if let Ok(naive) = trimmed.parse::<NaiveDateTime>() {
        return naive.format(format).to_string();
    }
    if let Ok(date) = trimmed.parse::<NaiveDate>() {
        return date.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

/// Card listing tasks with status, title and creation time.
pub struct TaskList<'a> {
    tasks: &'a [Task],
    title: &'a str,
    description: &'a str,
    empty_text: &'a str,
    loading: bool,
    busy: Option<&'a HashSet<TaskId>>,
    timestamp_format: &'a str,
    tick: u64,
    highlight: bool,
}

impl<'a> TaskList<'a> {
    #[must_use]
    pub const fn new(tasks: &'a [Task]) -> Self {
        Self {
            tasks,
            title: "Upcoming tasks",
            description: "Latest created or recently completed.",
            empty_text: "No tasks found.",
            loading: false,
            busy: None,
            timestamp_format: "%d/%m/%Y %H:%M",
            tick: 0,
            highlight: false,
        }
    }

    #[must_use]
    pub const fn title(mut self, title: &'a str, description: &'a str) -> Self {
        self.title = title;
        self.description = description;
        self
    }

    #[must_use]
    pub const fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }

    #[must_use]
    pub const fn loading(mut self, loading: bool, tick: u64) -> Self {
        self.loading = loading;
        self.tick = tick;
        self
    }

    /// Ids with a request in flight; their rows are dimmed.
    #[must_use]
    pub const fn busy(mut self, busy: &'a HashSet<TaskId>) -> Self {
        self.busy = Some(busy);
        self
    }

    #[must_use]
    pub const fn timestamp_format(mut self, format: &'a str) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Highlights the selected row.
    #[must_use]
    pub const fn selectable(mut self) -> Self {
        self.highlight = true;
        self
    }

    fn is_busy(&self, id: TaskId) -> bool {
        self.busy.is_some_and(|busy| busy.contains(&id))
    }

    fn item(&self, task: &'a Task) -> ListItem<'a> {
        let done = task.status().is_done();
        let busy = self.is_busy(task.id());

        let mut title_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        if done {
            title_style = title_style
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT);
        }
        if busy {
            title_style = title_style.add_modifier(Modifier::DIM);
        }

        let checkbox_style = if done {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Yellow)
        };

        let mut title_line = vec![
            Span::styled(task.status().checkbox(), checkbox_style),
            Span::raw(" "),
            Span::styled(task.title(), title_style),
        ];
        if busy {
            title_line.push(Span::raw(" "));
            title_line.push(Span::styled(
                Spinner::frame(self.tick),
                Style::default().fg(Color::Cyan),
            ));
        }

        let meta_line = Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format_timestamp(task.created_at(), self.timestamp_format),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("  {}", task.status().label()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        ListItem::new(vec![Line::from(title_line), meta_line])
    }
}

impl StatefulWidget for TaskList<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ListState) {
        let content = Card::new(self.title)
            .description(self.description)
            .render_frame(area, buf);

        if self.loading {
            Spinner::new(self.tick)
                .label("Loading...")
                .render(content, buf);
            return;
        }

        if self.tasks.is_empty() {
            Paragraph::new(Line::styled(
                self.empty_text,
                Style::default().fg(Color::DarkGray),
            ))
            .centered()
            .render(content, buf);
            return;
        }

        let items: Vec<ListItem<'_>> = self.tasks.iter().map(|task| self.item(task)).collect();
        let mut list = List::new(items);
        if self.highlight {
            list = list
                .highlight_style(Style::default().bg(Color::Rgb(30, 41, 59)))
                .highlight_symbol("▌");
        }

        StatefulWidget::render(list, content, buf, state);
    }
}
