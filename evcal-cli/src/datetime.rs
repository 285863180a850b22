//! Typed start/end input for events.
//!
//! ISO input ("2021-07-07", "2021-07-07T09:30") is read exactly; anything else
//! goes through fuzzydate. Input without a time of day is all-day.

use anyhow::{Context, Result, anyhow};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

const TIMED_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

const DAY_AND_MONTH_NAMES: [&str; 19] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Which end of an event a typed value bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    /// A date-only end names the event's last day, so it runs to the next midnight.
    End,
}

/// A point in time the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct When {
    pub at: NaiveDateTime,
    pub all_day: bool,
}

impl When {
    pub fn parse(input: &str, bound: Bound) -> Result<When> {
        let input = input.trim();
        let (at, all_day) = match parse_exact(input) {
            Some(parsed) => parsed,
            None => parse_fuzzy(input)?,
        };

        let at = match (all_day, bound) {
            (true, Bound::End) => at
                .checked_add_days(Days::new(1))
                .with_context(|| format!("Date out of range: \"{}\"", input))?,
            _ => at,
        };

        Ok(When { at, all_day })
    }

    /// End of an event starting here, typed either as a length ("2h",
    /// "3days") or as a date/time, optionally after "until" or "to".
    pub fn end_from(&self, input: &str) -> Result<When> {
        let input = input.trim();
        if let Ok(length) = humantime::parse_duration(input) {
            return self.shifted(length);
        }

        let input = input
            .strip_prefix("until ")
            .or_else(|| input.strip_prefix("to "))
            .unwrap_or(input);
        When::parse(input, Bound::End)
    }

    /// End of an event starting here that lasts `input`.
    pub fn lasting(&self, input: &str) -> Result<When> {
        let length = humantime::parse_duration(input.trim())
            .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
        self.shifted(length)
    }

    /// One hour later for timed events, the next midnight for all-day ones.
    pub fn default_end(&self) -> Result<When> {
        let length = if self.all_day {
            TimeDelta::days(1)
        } else {
            TimeDelta::hours(1)
        };
        self.offset_by(length)
    }

    /// The same kind of time moved by `length`.
    pub fn offset_by(&self, length: TimeDelta) -> Result<When> {
        let at = self
            .at
            .checked_add_signed(length)
            .ok_or_else(|| anyhow!("{} plus {} is out of range", self.at, length))?;
        Ok(When {
            at,
            all_day: self.all_day,
        })
    }

    fn shifted(&self, length: std::time::Duration) -> Result<When> {
        let length = TimeDelta::from_std(length).context("Duration too large")?;
        self.offset_by(length)
    }
}

fn parse_exact(input: &str) -> Option<(NaiveDateTime, bool)> {
    TIMED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|at| (at, false))
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|date| (date.and_time(NaiveTime::MIN), true))
        })
}

fn parse_fuzzy(input: &str) -> Result<(NaiveDateTime, bool)> {
    let words: Vec<String> = input
        .to_lowercase()
        .split_whitespace()
        .map(expand_name)
        .collect();

    let at = fuzzydate::parse(words.join(" "))
        .map_err(|_| anyhow!("Could not parse date/time: \"{}\"", input))?;

    if names_time_of_day(&words) {
        Ok((at, false))
    } else {
        Ok((at.date().and_time(NaiveTime::MIN), true))
    }
}

/// "sat" -> "saturday", "sept" -> "september".
fn expand_name(word: &str) -> String {
    let is_name_prefix = word.len() >= 3 && word.chars().all(|c| c.is_ascii_alphabetic());
    DAY_AND_MONTH_NAMES
        .iter()
        .find(|name| is_name_prefix && name.starts_with(word))
        .map_or_else(|| word.to_string(), |name| name.to_string())
}

fn names_time_of_day(words: &[String]) -> bool {
    words.iter().enumerate().any(|(i, word)| {
        let previous = i.checked_sub(1).map(|p| words[p].as_str());
        match word.as_str() {
            "noon" | "midnight" => true,
            "am" | "pm" => previous.is_some_and(|p| p.ends_with(|c: char| c.is_ascii_digit())),
            _ => is_clock(word) || (previous == Some("at") && starts_with_digit(word)),
        }
    })
}

/// "15:00", "9am", "6:30pm".
fn is_clock(word: &str) -> bool {
    let (digits, meridiem) = match word.strip_suffix("am").or_else(|| word.strip_suffix("pm")) {
        Some(rest) => (rest, true),
        None => (word, false),
    };
    let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    match digits.split_once(':') {
        Some((hour, minute)) => numeric(hour) && numeric(minute),
        None => meridiem && numeric(digits),
    }
}

fn starts_with_digit(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit())
}
