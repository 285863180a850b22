//! Date ranges for the month/week/day calendar views.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::overlap::overlaps;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
}

impl FromStr for CalendarView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "month" => Ok(CalendarView::Month),
            "week" => Ok(CalendarView::Week),
            "day" => Ok(CalendarView::Day),
            other => Err(format!(
                "Invalid view '{}'. Expected month, week or day",
                other
            )),
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarView::Month => write!(f, "month"),
            CalendarView::Week => write!(f, "week"),
            CalendarView::Day => write!(f, "day"),
        }
    }
}

/// Half-open window `[from, to)` of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateRange {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        DateRange { from, to }
    }

    /// The window a view shows around `anchor`.
    /// Weeks start on Sunday. `None` when the window runs past the calendar's
    /// representable range.
    pub fn for_view(view: CalendarView, anchor: NaiveDate) -> Option<Self> {
        let (first, last) = match view {
            CalendarView::Day => (anchor, anchor.checked_add_days(Days::new(1))?),
            CalendarView::Week => {
                let offset = anchor.weekday().num_days_from_sunday();
                let sunday = anchor.checked_sub_days(Days::new(offset.into()))?;
                (sunday, sunday.checked_add_days(Days::new(7))?)
            }
            CalendarView::Month => {
                let first = anchor.with_day(1)?;
                (first, first.checked_add_months(Months::new(1))?)
            }
        };

        Some(DateRange {
            from: first.and_time(NaiveTime::MIN),
            to: last.and_time(NaiveTime::MIN),
        })
    }

    /// Parse YYYY-MM-DD as the anchor of a view.
    pub fn from_args(view: CalendarView, date: &str) -> Result<Self, String> {
        let anchor = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", date))?;
        Self::for_view(view, anchor)
            .ok_or_else(|| format!("Date '{}' is out of range for a {} view", date, view))
    }

    /// Whether the event shows up in this window.
    pub fn contains_event(&self, event: &Event) -> bool {
        overlaps((self.from, self.to), event.interval())
    }
}
