use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use wordbook_client::WordbookClient;
use wordbook_config::Config;
use wordbook_core::DictionaryCache;
use wordbook_core::cache::default_cache_dir;

mod cli;
mod commands;
mod logging;
mod output;

use self::cli::Cli;
use self::commands::App;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = Config::new();
    logging::init(config.log_json);

    let cli = Cli::parse();

    let app = match build_app(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout();
    match commands::run(&app, cli.command, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_app(config: &Config) -> anyhow::Result<App> {
    let client =
        WordbookClient::from_config(&config.network).context("Failed to create HTTP client")?;

    let dir = config
        .cache
        .dir
        .clone()
        .or_else(default_cache_dir)
        .unwrap_or_else(|| std::env::temp_dir().join("wordbook"));
    let cache =
        DictionaryCache::in_dir(dir).with_ttl(Duration::from_secs(config.cache.ttl_seconds));
    tracing::debug!("Using dictionary cache {}", cache.path().display());

    Ok(App::new(client, cache))
}
