use anyhow::Result;
use evcal_core::{Event, EventDraft, EventId};

use crate::client::Client;
use crate::datetime::{Bound, When};
use crate::render::Render;

/// Fields to change; `None` keeps the current value.
#[derive(Default)]
pub struct EditInput {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
}

pub async fn run(client: &Client, id: EventId, input: EditInput) -> Result<()> {
    let current = client.get_event(id).await?;
    let draft = apply_edit(&current, input)?;

    let response = client.edit_event(id, &draft).await?;
    println!("{}", response.notification.render());
    println!("{}", response.event.render());

    Ok(())
}

/// Merge the requested changes into the current event.
///
/// Moving the start without giving an end keeps the event's length. An empty
/// category or color clears it.
fn apply_edit(current: &Event, input: EditInput) -> Result<EventDraft> {
    let mut draft = current.to_draft();

    if let Some(title) = input.title {
        draft.title = title;
    }

    let start = match &input.start {
        Some(s) => When::parse(s, Bound::Start)?,
        None => When {
            at: current.start,
            all_day: current.all_day,
        },
    };

    let end = match &input.end {
        Some(e) => start.end_from(e)?.at,
        None if input.start.is_some() => start.offset_by(current.end - current.start)?.at,
        None => current.end,
    };

    draft.start = Some(start.at);
    draft.end = Some(end);
    draft.all_day = start.all_day;

    if let Some(category) = input.category {
        draft.category = Some(category).filter(|c| !c.is_empty());
    }
    if let Some(color) = input.color {
        draft.color = Some(color).filter(|c| !c.is_empty());
    }

    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use evcal_core::EventStyle;

    fn july(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn vacation() -> Event {
        Event {
            id: EventId(1),
            title: "Vacation".into(),
            start: july(7, 0),
            end: july(10, 0),
            category: Some("leisure".into()),
            color: None,
            all_day: false,
            style: EventStyle {
                background_color: "#3174ad".into(),
            },
        }
    }

    #[test]
    fn no_changes_keeps_event() {
        let draft = apply_edit(&vacation(), EditInput::default()).unwrap();
        assert_eq!(draft, vacation().to_draft());
    }

    #[test]
    fn title_only() {
        let input = EditInput {
            title: Some("Holiday".into()),
            ..EditInput::default()
        };
        let draft = apply_edit(&vacation(), input).unwrap();
        assert_eq!(draft.title, "Holiday");
        assert_eq!(draft.start, Some(july(7, 0)));
        assert_eq!(draft.end, Some(july(10, 0)));
    }

    #[test]
    fn moving_start_keeps_length() {
        let input = EditInput {
            start: Some("2021-07-12T00:00".into()),
            ..EditInput::default()
        };
        let draft = apply_edit(&vacation(), input).unwrap();
        assert_eq!(draft.start, Some(july(12, 0)));
        assert_eq!(draft.end, Some(july(15, 0)));
    }

    #[test]
    fn explicit_end_with_duration() {
        let input = EditInput {
            end: Some("2h".into()),
            ..EditInput::default()
        };
        let draft = apply_edit(&vacation(), input).unwrap();
        assert_eq!(draft.end, Some(july(7, 2)));
    }

    #[test]
    fn moving_start_past_the_calendar_is_an_error() {
        let input = EditInput {
            start: Some("+262142-12-31T00:00".into()),
            ..EditInput::default()
        };
        assert!(apply_edit(&vacation(), input).is_err());
    }

    #[test]
    fn empty_category_clears_it() {
        let input = EditInput {
            category: Some(String::new()),
            color: Some("#00ff00".into()),
            ..EditInput::default()
        };
        let draft = apply_edit(&vacation(), input).unwrap();
        assert!(draft.category.is_none());
        assert_eq!(draft.color.as_deref(), Some("#00ff00"));
    }
}
