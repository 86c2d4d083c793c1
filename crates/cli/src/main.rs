//! `rickdex` -- terminal browser for the episodes integration API.
//!
//! Lists episodes ten at a time and opens one episode with its
//! characters and locations.
//!
//! # Environment variables
//!
//! | Variable       | Required | Default                     | Description                  |
//! |----------------|----------|-----------------------------|------------------------------|
//! | `API_BASE_URL` | no       | `http://localhost:3001/api` | Root of the integration API  |
//! | `RUST_LOG`     | no       | `rickdex=info,...`          | Log filter (logs go to stderr) |

use std::sync::Arc;

use rickdex_cli::shell::Shell;
use rickdex_client::{ClientConfig, EpisodeApi, HttpEpisodeApi};
use rickdex_events::NoticeBus;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rickdex=info,rickdex_cli=info,rickdex_browser=info,rickdex_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, "Starting rickdex");

    let api: Arc<dyn EpisodeApi> = Arc::new(HttpEpisodeApi::new(config.base_url));
    let notices = Arc::new(NoticeBus::default());

    Shell::new(api, notices)
        .run(BufReader::new(tokio::io::stdin()))
        .await?;

    Ok(())
}
