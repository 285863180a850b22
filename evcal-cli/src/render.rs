//! Terminal rendering for evcal types.

use chrono::{Duration, NaiveDateTime};
use evcal_core::{Event, Notification};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Notification {
    fn render(&self) -> String {
        match self {
            Notification::Success(message) => message.green().to_string(),
            Notification::Error(message) => message.red().to_string(),
        }
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let category = self
            .category
            .as_ref()
            .map(|c| format!(" [{}]", c))
            .unwrap_or_default();

        format!(
            "{} {} {} {}{}",
            swatch(&self.style.background_color),
            format!("#{:<5}", self.id.0).dimmed(),
            self.title.bold(),
            self.render_span().dimmed(),
            category.dimmed()
        )
    }
}

pub trait RenderSpan {
    fn render_span(&self) -> String;
}

impl RenderSpan for Event {
    /// e.g. "Jul 7 2021 09:00 → Jul 7 2021 10:00", or "Jul 7 → Jul 9 (all-day)"
    fn render_span(&self) -> String {
        if self.all_day {
            // All-day events end at the following midnight; show the last day.
            let last = if self.end > self.start {
                self.end - Duration::days(1)
            } else {
                self.end
            };
            let start = self.start.format("%b %-d").to_string();
            let end = last.format("%b %-d").to_string();
            if start == end {
                format!("{} (all-day)", start)
            } else {
                format!("{} → {} (all-day)", start, end)
            }
        } else {
            format!("{} → {}", format_stamp(&self.start), format_stamp(&self.end))
        }
    }
}

fn format_stamp(dt: &NaiveDateTime) -> String {
    dt.format("%b %-d %Y %H:%M").to_string()
}

/// A colored dot for a "#rrggbb" color, or a plain one if it doesn't parse.
fn swatch(color: &str) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => "●".truecolor(r, g, b).to_string(),
        None => "●".to_string(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Format a day heading (e.g. "Today", "Tomorrow", "Wed Jul 7 2021")
pub fn format_date_label(date: chrono::NaiveDate) -> String {
    let today = chrono::Local::now().date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

/// Format the time column of a listing (e.g. "15:00" or "all-day")
pub fn format_time(event: &Event) -> String {
    if event.all_day {
        "all-day".to_string()
    } else {
        format!("{:>7}", event.start.format("%H:%M"))
    }
}
