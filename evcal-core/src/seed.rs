//! Demo events present when a store starts.

use chrono::{NaiveDate, NaiveDateTime};

use crate::event::{Event, EventId, EventStyle};

fn midnight(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

/// The three demo events, styled with `default_color`.
pub fn demo_events(default_color: &str) -> Vec<Event> {
    let entries = [
        (0, "Big Meeting", true, (2021, 6, 30), (2021, 6, 30)),
        (1, "Vacation", false, (2021, 7, 7), (2021, 7, 10)),
        (2, "Conference", false, (2021, 7, 20), (2021, 7, 23)),
    ];

    entries
        .into_iter()
        .filter_map(|(id, title, all_day, (sy, sm, sd), (ey, em, ed))| {
            Some(Event {
                id: EventId(id),
                title: title.to_string(),
                start: midnight(sy, sm, sd)?,
                end: midnight(ey, em, ed)?,
                category: None,
                color: None,
                all_day,
                style: EventStyle {
                    background_color: default_color.to_string(),
                },
            })
        })
        .collect()
}
