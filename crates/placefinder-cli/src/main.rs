mod interactive;
mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use placefinder_core::Suggestion;
use placefinder_geocode::GeocodeClient;
use placefinder_search::refine;

#[derive(Debug, Parser)]
#[command(name = "placefinder")]
#[command(about = "Address autocomplete against a geocoding service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch suggestions for a query once and print them.
    Suggest {
        text: String,
        /// Re-rank the fetched list with the local fuzzy filter.
        #[arg(long)]
        refine: bool,
    },
    /// Resolve a suggestion lookup key to a full address.
    Resolve { magic_key: String },
    /// Interactive search: queries on stdin, live suggestion state out.
    Search,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = placefinder_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = Arc::new(GeocodeClient::new(
        &config.api_key,
        config.request_timeout_secs,
    )?);
    match cli.command {
        Commands::Suggest { text, refine } => {
            run_suggest(&client, &config, &text, refine || config.refine_locally).await?;
        }
        Commands::Resolve { magic_key } => {
            run_resolve(&client, &magic_key).await?;
        }
        Commands::Search => {
            interactive::run(client, &config).await?;
        }
    }

    Ok(())
}

async fn run_suggest(
    client: &GeocodeClient,
    config: &placefinder_core::AppConfig,
    text: &str,
    refine_locally: bool,
) -> anyhow::Result<()> {
    if text.is_empty() {
        println!("{}", render::EMPTY_QUERY_PROMPT);
        return Ok(());
    }

    let suggestions = client
        .suggest(
            text,
            (config.bias_longitude, config.bias_latitude),
            config.max_suggestions,
        )
        .await?;
    let suggestions = if refine_locally {
        refine(&suggestions, text)
    } else {
        suggestions
    };

    if suggestions.is_empty() {
        println!("{}", render::NO_RESULTS);
        return Ok(());
    }
    for (index, suggestion) in suggestions.iter().enumerate() {
        println!("{}", render::suggestion_row(index, suggestion));
    }
    Ok(())
}

async fn run_resolve(client: &GeocodeClient, magic_key: &str) -> anyhow::Result<()> {
    let suggestion = Suggestion {
        text: String::new(),
        magic_key: magic_key.to_owned(),
    };
    match client.resolve(&suggestion).await {
        Ok(resolved) => {
            println!("{resolved}");
            Ok(())
        }
        Err(e) => {
            // Resolve failures are surfaced explicitly, never dropped.
            tracing::error!(error = %e, magic_key, "resolve failed");
            Err(e.into())
        }
    }
}
