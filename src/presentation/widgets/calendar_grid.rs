//! Month grid with per-day task badges.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::domain::calendar::{DayCell, MonthCursor, MonthGrid, WEEKDAY_LABELS};

pub struct CalendarGrid<'a> {
    month: MonthCursor,
    grid: &'a MonthGrid,
}

impl<'a> CalendarGrid<'a> {
    #[must_use]
    pub const fn new(month: MonthCursor, grid: &'a MonthGrid) -> Self {
        Self { month, grid }
    }

    fn cell_style(cell: &DayCell) -> Style {
        let mut style = if cell.count > 0 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        if cell.is_today {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if cell.is_selected {
            style = style.bg(Color::Cyan).fg(Color::Black);
        }
        style
    }

    fn cell_text(cell: &DayCell) -> String {
        if cell.count > 0 {
            format!("{:>2}•{}", cell.day(), cell.count)
        } else {
            format!("{:>2}", cell.day())
        }
    }
}

impl Widget for CalendarGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let weeks = self.grid.weeks();
        let week_rows = u16::try_from(weeks.len()).unwrap_or(6);

        let [title_area, _, labels_area, days_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(week_rows * 2),
        ])
        .areas(area);

        Paragraph::new(Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.month.title(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        ]))
        .centered()
        .render(title_area, buf);

        let columns = Layout::horizontal([Constraint::Ratio(1, 7); 7]);

        let label_areas: [Rect; 7] = columns.areas(labels_area);
        for (label, column) in WEEKDAY_LABELS.iter().zip(label_areas) {
            Paragraph::new(Line::styled(*label, Style::default().fg(Color::DarkGray)))
                .centered()
                .render(column, buf);
        }

        let row_areas = Layout::vertical(vec![Constraint::Length(2); weeks.len()]).split(days_area);
        for (week, row) in weeks.iter().zip(row_areas.iter()) {
            let cell_areas: [Rect; 7] = columns.areas(*row);
            for (slot, column) in week.iter().zip(cell_areas) {
                let Some(cell) = slot else {
                    continue;
                };
                let text_area = Rect::new(column.x, column.y, column.width, 1);
                Paragraph::new(Line::styled(Self::cell_text(cell), Self::cell_style(cell)))
                    .centered()
                    .render(text_area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::CalendarState;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cell_text_includes_badge() {
        let cell = DayCell {
            date: date(2024, 6, 5),
            count: 2,
            is_today: false,
            is_selected: false,
        };
        assert_eq!(CalendarGrid::cell_text(&cell), " 5•2");
    }

    #[test]
    fn test_renders_title_and_badge() {
        let state = CalendarState::new(date(2024, 6, 10));
        let counts = HashMap::from([(date(2024, 6, 5), 1)]);
        let grid = state.grid(&counts);

        let area = Rect::new(0, 0, 56, 16);
        let mut buf = Buffer::empty(area);
        CalendarGrid::new(state.view(), &grid).render(area, &mut buf);

        let rendered: String = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");

        assert!(rendered.contains("June 2024"));
        assert!(rendered.contains("5•1"));
        assert!(rendered.contains("Sun"));
    }
}
