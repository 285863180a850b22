mod client;
mod commands;
mod datetime;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use evcal_core::EventId;
use evcal_core::config::EvcalConfig;
use evcal_core::date_range::CalendarView;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::client::{ApiError, Client};
use crate::render::Render;

#[derive(Parser)]
#[command(name = "evcal")]
#[command(about = "Add, edit and view calendar events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, optionally as a month/week/day view
    List {
        /// month, week or day
        #[arg(short, long)]
        view: Option<CalendarView>,

        /// Any date inside the view (e.g. "2021-07-08", "next friday")
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show one event
    Show { id: u64 },
    /// Add a new event (prompts for anything missing)
    Add {
        title: Option<String>,

        /// Start date/time (e.g. "tomorrow 3pm", "2021-07-11")
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time
        #[arg(short, long, conflicts_with = "duration")]
        end: Option<String>,

        /// Length of the event (e.g. "30m", "2h", "3days")
        #[arg(short, long)]
        duration: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Display color as hex (e.g. "#ff8800")
        #[arg(long)]
        color: Option<String>,
    },
    /// Change fields of an existing event
    Edit {
        id: u64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        start: Option<String>,

        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },
    /// Delete an event
    Delete {
        id: u64,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show config path and effective settings
    Config,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        match err.downcast_ref::<ApiError>() {
            Some(api) => match &api.notification {
                Some(notification) => eprintln!("{}", notification.render()),
                None => eprintln!("{}", api.to_string().red()),
            },
            None => eprintln!("{} {:#}", "error:".red(), err),
        }
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    let config = EvcalConfig::load()?;
    let connect = || Client::connect(config.server.base_url());

    match command {
        Commands::List { view, date } => commands::list::run(&connect().await?, view, date).await,
        Commands::Show { id } => commands::show::run(&connect().await?, EventId(id)).await,
        Commands::Add {
            title,
            start,
            end,
            duration,
            category,
            color,
        } => {
            let input = commands::add::AddInput {
                title,
                start,
                end,
                duration,
                category,
                color,
            };
            commands::add::run(&connect().await?, input).await
        }
        Commands::Edit {
            id,
            title,
            start,
            end,
            category,
            color,
        } => {
            let input = commands::edit::EditInput {
                title,
                start,
                end,
                category,
                color,
            };
            commands::edit::run(&connect().await?, EventId(id), input).await
        }
        Commands::Delete { id, yes } => {
            commands::delete::run(&connect().await?, EventId(id), yes).await
        }
        Commands::Config => commands::config::run(&config),
    }
}
