//! Month calendar aggregation of tasks by creation day.
//!
//! Every task is bucketed by the local calendar date of its `created_at`
//! timestamp. The month view is Sunday-first and wraps year boundaries.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

use crate::domain::entities::Task;

/// Column headers of the month grid, Sunday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar date of a creation timestamp in the given zone.
///
/// Timestamps with an offset are converted into `tz`; naive timestamps are
/// taken as already local.
#[must_use]
pub fn creation_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(tz).date_naive());
    }

    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.date())
        .or_else(|_| raw.parse::<NaiveDate>())
        .ok()
}

/// Number of tasks created on each day.
#[must_use]
pub fn count_by_day_in<Tz: TimeZone>(tasks: &[Task], tz: &Tz) -> HashMap<NaiveDate, usize> {
    let mut counts = HashMap::new();
    for task in tasks {
        if let Some(day) = creation_date_in(task.created_at(), tz) {
            *counts.entry(day).or_insert(0) += 1;
        }
    }
    counts
}

/// Tasks created on `day`, in list order.
#[must_use]
pub fn tasks_on_day_in<'a, Tz: TimeZone>(
    tasks: &'a [Task],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| creation_date_in(task.created_at(), tz) == Some(day))
        .collect()
}

/// A month of a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Creates a cursor; `month` is 1-based.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Following month; December rolls into January of the next year.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Preceding month; January rolls into December of the previous year.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    const fn is_leap_year(self) -> bool {
        (self.year % 4 == 0 && self.year % 100 != 0) || self.year % 400 == 0
    }

    #[must_use]
    pub const fn days_in_month(self) -> u32 {
        match self.month {
            2 if self.is_leap_year() => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Date of day `day` in this month.
    #[must_use]
    pub fn day(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Blank cells before day 1 in a Sunday-first week.
    #[must_use]
    pub fn leading_blanks(self) -> u32 {
        self.day(1)
            .map_or(0, |first| first.weekday().num_days_from_sunday())
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Human title, e.g. `June 2024`.
    #[must_use]
    pub fn title(self) -> String {
        let name = MONTH_NAMES
            .get(self.month as usize - 1)
            .copied()
            .unwrap_or_default();
        format!("{name} {}", self.year)
    }
}

/// One day of the rendered month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub count: usize,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCell {
    #[must_use]
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Month laid out as Sunday-first weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub leading_blanks: u32,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Rows of seven slots; `None` pads before day 1 and after the last day.
    #[must_use]
    pub fn weeks(&self) -> Vec<[Option<DayCell>; 7]> {
        let slots: Vec<Option<DayCell>> = std::iter::repeat_n(None, self.leading_blanks as usize)
            .chain(self.cells.iter().copied().map(Some))
            .collect();

        slots
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                for (slot, cell) in week.iter_mut().zip(chunk) {
                    *slot = *cell;
                }
                week
            })
            .collect()
    }

    #[must_use]
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

/// Viewed month plus selected day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    view: MonthCursor,
    selected: NaiveDate,
    today: NaiveDate,
}

impl CalendarState {
    /// Starts on the month of `today` with `today` selected.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: MonthCursor::of(today),
            selected: today,
            today,
        }
    }

    #[must_use]
    pub const fn view(&self) -> MonthCursor {
        self.view
    }

    #[must_use]
    pub const fn selected(&self) -> NaiveDate {
        self.selected
    }

    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn next_month(&mut self) {
        self.view = self.view.next();
    }

    pub fn previous_month(&mut self) {
        self.view = self.view.previous();
    }

    /// Shows the current month; the selected day is kept.
    pub fn go_to_today(&mut self) {
        self.view = MonthCursor::of(self.today);
    }

    /// Selects `date` and shows its month.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.view = MonthCursor::of(date);
    }

    /// Moves the selection by `days`.
    ///
    /// When the selected day is outside the viewed month the first day of
    /// the viewed month is selected instead.
    pub fn move_selection(&mut self, days: i64) {
        if !self.view.contains(self.selected) {
            if let Some(first) = self.view.day(1) {
                self.select(first);
            }
            return;
        }

        if let Some(date) = self.selected.checked_add_signed(TimeDelta::days(days)) {
            self.select(date);
        }
    }

    /// Builds the grid of the viewed month with per-day counts.
    #[must_use]
    pub fn grid(&self, counts: &HashMap<NaiveDate, usize>) -> MonthGrid {
        let cells = (1..=self.view.days_in_month())
            .filter_map(|day| self.view.day(day))
            .map(|date| DayCell {
                date,
                count: counts.get(&date).copied().unwrap_or(0),
                is_today: date == self.today,
                is_selected: date == self.selected,
            })
            .collect();

        MonthGrid {
            leading_blanks: self.view.leading_blanks(),
            cells,
        }
    }
}
