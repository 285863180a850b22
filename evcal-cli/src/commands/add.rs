use anyhow::Result;
use dialoguer::Input;
use evcal_core::EventDraft;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::datetime::{Bound, When};
use crate::render::Render;

/// Raw values from the command line; anything missing is prompted for.
pub struct AddInput {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub duration: Option<String>,
    pub category: Option<String>,
    pub color: Option<String>,
}

pub async fn run(client: &Client, input: AddInput) -> Result<()> {
    let interactive = input.title.is_none() || input.start.is_none();

    // --- Title ---
    let title = match input.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Start ---
    let start = match input.start {
        Some(s) => When::parse(&s, Bound::Start)?,
        None => prompt_with_retry("  When?", |s| When::parse(s, Bound::Start))?,
    };

    // --- Duration / End ---
    let default_hint = if start.all_day { "1 day" } else { "1 hour" };

    let end = if let Some(end_input) = input.end {
        start.end_from(&end_input)?
    } else if let Some(dur_input) = input.duration {
        start.lasting(&dur_input)?
    } else if interactive {
        prompt_duration(&start, default_hint)?
    } else {
        start.default_end()?
    };

    // --- Category / Color ---
    let category = match input.category {
        Some(c) => Some(c),
        None if interactive => prompt_optional("  Category? (skip)")?,
        None => None,
    };
    let color = match input.color {
        Some(c) => Some(c),
        None if interactive => prompt_optional("  Color? (skip)")?,
        None => None,
    };

    let draft = draft_from(title, start, end, category, color);
    let response = client.add_event(&draft).await?;

    if interactive {
        println!();
    }
    println!("{}", response.notification.render());
    println!("{}", response.event.render());

    Ok(())
}

fn draft_from(
    title: String,
    start: When,
    end: When,
    category: Option<String>,
    color: Option<String>,
) -> EventDraft {
    EventDraft {
        title,
        start: Some(start.at),
        end: Some(end.at),
        category,
        color,
        all_day: start.all_day,
    }
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<F>(prompt: &str, parse: F) -> Result<When>
where
    F: Fn(&str) -> Result<When>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Prompt for duration/end with retry on parse errors.
fn prompt_duration(start: &When, default_hint: &str) -> Result<When> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!("  How long? ({})", default_hint))
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return start.default_end();
        }
        match start.end_from(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(String::new())
        .show_default(false)
        .interact_text()?;
    Ok(if value.is_empty() { None } else { Some(value) })
}
