use std::fmt::{Display, Formatter};

use chrono::{Datelike, Days, NaiveDate};

/// Calendar month, formatted as `YYYY-MM`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Window<T> {
    pub previous: T,
    pub current: T,
    pub next: T,
}

/// Adjacent day, month, and year labels the history chart endpoint expects.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChartWindow {
    pub days: Window<NaiveDate>,
    pub months: Window<YearMonth>,
    pub years: Window<i32>,
}

impl ChartWindow {
    /// Build the window around the date.
    ///
    /// Returns [`None`] only at the very ends of the supported calendar.
    pub fn around(date: NaiveDate) -> Option<Self> {
        let first_of_month = date.with_day(1)?;
        Some(Self {
            days: Window { previous: date.pred_opt()?, current: date, next: date.succ_opt()? },
            months: Window {
                previous: first_of_month.pred_opt()?.into(),
                current: date.into(),
                // No month is longer than 31 days, so this always lands in the following one:
                next: first_of_month.checked_add_days(Days::new(32))?.into(),
            },
            years: Window {
                previous: date.year() - 1,
                current: date.year(),
                next: date.year() + 1,
            },
        })
    }
}
