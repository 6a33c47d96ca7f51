use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use postboard::api::{GraphqlClient, HttpTransport};
use postboard::cli::Cli;
use postboard::config::Config;
use postboard::logging::init_tracing;
use postboard::navigation::Router;
use postboard::storage::{FileStorage, TokenStorage};
use postboard::store::{Action, Getters, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)?;
    if let Some(endpoint) = &cli.endpoint {
        config.api.endpoint = endpoint.clone();
        config.validate()?;
    }

    init_tracing(&config.logging.filter);

    let storage_path = config
        .storage
        .path
        .clone()
        .unwrap_or_else(FileStorage::default_path);
    let storage: Arc<dyn TokenStorage> = Arc::new(FileStorage::new(storage_path));
    let transport = HttpTransport::new(&config.api, storage.clone())
        .context("Failed to build HTTP client")?;
    tracing::debug!(endpoint = transport.endpoint(), "Using GraphQL endpoint");

    let client = GraphqlClient::new(Arc::new(transport)).with_fetch_policy(config.api.fetch_policy);
    let router = Arc::new(Router::default());
    let store = Store::new(Arc::new(client), storage, router.clone());

    for action in cli.command.actions() {
        store.dispatch(action).await;
    }

    // A reload re-runs the startup fetch of the signed-in user.
    if router.reloads() > 0 {
        store.dispatch(Action::GetCurrentUser).await;
    }

    let state = store.snapshot();
    println!("{}", serde_json::to_string_pretty(&cli.command.view(&state)?)?);

    if let Some(err) = state.error() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    Ok(())
}
