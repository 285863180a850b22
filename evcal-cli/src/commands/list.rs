use anyhow::Result;
use evcal_core::Event;
use evcal_core::date_range::CalendarView;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::datetime::{Bound, When};
use crate::render::{Render, format_date_label, format_time};

pub async fn run(client: &Client, view: Option<CalendarView>, date: Option<String>) -> Result<()> {
    if view.is_none() && date.is_none() {
        let events = client.list_events(None, None).await?;
        if events.is_empty() {
            println!("{}", "No events found".dimmed());
        }
        // Store order, i.e. the order events were added in.
        for event in &events {
            println!("{}", event.render());
        }
        return Ok(());
    }

    let view = view.unwrap_or_default();
    let anchor = match date {
        Some(input) => {
            let anchor = When::parse(&input, Bound::Start)?;
            Some(anchor.at.format("%Y-%m-%d").to_string())
        }
        None => None,
    };

    let mut events = client.list_events(Some(view), anchor).await?;
    if events.is_empty() {
        println!("{}", format!("No events in this {}", view).dimmed());
        return Ok(());
    }

    events.sort_by_key(|e| e.start);
    print_by_day(&events);

    Ok(())
}

/// Print events under a heading per start day.
fn print_by_day(events: &[Event]) {
    let mut current_date = None;

    for event in events {
        let date = event.start.date();

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(date).bold());
            current_date = Some(date);
        }

        let category = event
            .category
            .as_ref()
            .map(|c| format!("[{}]", c))
            .unwrap_or_default();
        println!(
            "  {} {} {} {}",
            format_time(event),
            event.title,
            format!("#{}", event.id).dimmed(),
            category.dimmed()
        );
    }
}
