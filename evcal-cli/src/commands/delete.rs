use anyhow::Result;
use dialoguer::Confirm;
use evcal_core::EventId;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::Render;

pub async fn run(client: &Client, id: EventId, yes: bool) -> Result<()> {
    if !yes {
        let event = client.get_event(id).await?;
        println!("{}", event.render());

        let confirmed = Confirm::new()
            .with_prompt("  Delete this event?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "  Nothing deleted".dimmed());
            return Ok(());
        }
    }

    let response = client.delete_event(id).await?;
    println!("{}", response.notification.render());

    Ok(())
}
