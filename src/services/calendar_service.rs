use chrono::{Datelike, Days, Month, NaiveDate};

use crate::error::{Error, Result};
use crate::models::interview::Interview;

/// Six weeks, Sunday first.
pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(Error::InvalidInput(format!("Invalid month {}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.navigate(1).first_day();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    /// Moves `delta` months, wrapping the year as needed.
    pub fn navigate(&self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn next(&self) -> Self {
        self.navigate(1)
    }

    pub fn previous(&self) -> Self {
        self.navigate(-1)
    }

    pub fn title(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("");
        format!("{} {}", name, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub events: Vec<String>,
}

impl CalendarDay {
    pub fn day_number(&self) -> u32 {
        self.date.day()
    }
}

/// Builds the grid for `month`: trailing days of the previous month, the
/// month itself, then leading days of the next one. Interviews are listed on
/// the days of the displayed month only.
pub fn month_grid(month: CalendarMonth, today: NaiveDate, interviews: &[Interview]) -> Vec<CalendarDay> {
    let first = month.first_day();
    let leading = first.weekday().num_days_from_sunday() as u64;
    let start = first.checked_sub_days(Days::new(leading)).unwrap_or(first);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let in_month = date.year() == month.year && date.month() == month.month;
            let mut day_interviews: Vec<&Interview> = if in_month {
                interviews.iter().filter(|i| i.date == date).collect()
            } else {
                Vec::new()
            };
            day_interviews.sort_by_key(|i| i.time);
            CalendarDay {
                date,
                in_month,
                is_today: date == today,
                events: day_interviews.iter().map(|i| i.calendar_label()).collect(),
            }
        })
        .collect()
}
