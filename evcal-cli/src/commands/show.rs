use anyhow::Result;
use evcal_core::EventId;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::{Render, RenderSpan};

pub async fn run(client: &Client, id: EventId) -> Result<()> {
    let event = client.get_event(id).await?;

    println!("{}", event.render());
    println!("  {}     {}", "When:".dimmed(), event.render_span());
    if let Some(category) = &event.category {
        println!("  {} {}", "Category:".dimmed(), category);
    }
    println!("  {}    {}", "Color:".dimmed(), event.style.background_color);

    Ok(())
}
