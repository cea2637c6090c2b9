//! Run one movie service call without the GUI and print the result.
//! Usage:
//!   cargo run --bin service_probe -- search <title or id>
//!   cargo run --bin service_probe -- add <movie_id> <watchlist|watched>
//! Reads the MOVIE_SERVICE_* / MOVIE_USER_ID settings from the environment (.env supported).

use anyhow::{anyhow, Context, Result};
use cinelist::client::MovieClient;
use cinelist::config::ClientConfig;
use cinelist::movie::{render_details, ListName};
use cinelist::service::ProcessRunner;
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = ClientConfig::from_env()?;
    let client = MovieClient::new(
        Arc::new(ProcessRunner::new(config.service.clone())),
        config.placeholder_list.clone(),
    );

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(|s| s.as_str()) {
        Some("search") => {
            let query = args[1..].join(" ");
            let movie = client.search(&query).await?;
            print!("{}", render_details(&movie));
        }
        Some("add") => {
            let movie_id: i64 = args
                .get(1)
                .context("Missing movie id")?
                .parse()
                .context("movie id must be an integer")?;
            let list: ListName = args.get(2).context("Missing list name")?.parse()?;
            let message = client.add_to_list(config.user_id, movie_id, list).await?;
            println!("{}", message);
            for entry in client.refresh_list() {
                println!("  {}", entry);
            }
        }
        _ => {
            return Err(anyhow!(
                "Usage: service_probe search <query> | service_probe add <movie_id> <watchlist|watched>"
            ))
        }
    }

    Ok(())
}
