use crate::addon::AddonClient;
use crate::app_config::AppConfig;
use crate::cli::{Cli, Commands};
use crate::coordinator::Coordinator;
use crate::domain::controller_registry::ControllerRegistry;
use crate::domain::events::Event;
use crate::services::{InstallationAction, Services};
use crate::store::Store;
use crate::store_listener::store_listener;
use crate::tidbyt::TidbytController;
use crate::tronbyt::TronbytController;
use clap::Parser;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod addon;
mod api;
mod app_config;
mod cli;
mod coordinator;
mod domain;
mod properties;
mod services;
mod store;
mod store_listener;
mod tidbyt;
mod tronbyt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let addon = config.addon().map(|addon| AddonClient::new(Client::new(), addon));

    if let Commands::Apps = cli.command {
        let addon = addon.ok_or("configure the [addon] section to list its apps")?;
        cli::print_apps(&addon.apps().await?);
        return Ok(());
    }

    let tronbyt_api = config.tronbyt().map(tronbyt::new_api).transpose()?;
    let tidbyt_client = tidbyt::new_client()?;

    let (tx, rx) = mpsc::channel::<Event>(config.core().store_buffer_size());
    let mut store = Store::new(rx);
    let snapshot_rx = store.notifier();

    if let Commands::Run = cli.command {
        let listener_rx = store.notifier();
        task::spawn(async move {
            store_listener(listener_rx).await;
        });
        info!("✅  Initialized store listener");
    }

    task::spawn(async move {
        store.listen().await;
    });
    info!("✅  Initialized store");

    let needs_addon = matches!(cli.command, Commands::Run | Commands::Push(_) | Commands::Text(_));
    if needs_addon && config.tidbyt_devices().iter().any(|device| !device.is_tronbyt()) {
        if let Some(addon) = &addon {
            addon.wait_until_ready().await?;
        }
    }

    let mut controllers = ControllerRegistry::new();
    if let Some(api) = &tronbyt_api {
        controllers.register(Arc::new(TronbytController::new(api.clone())));
    }
    controllers.register(Arc::new(TidbytController::new(
        tidbyt_client.clone(),
        config.tidbyt_devices().to_vec(),
        addon,
    )));

    let coordinator = Coordinator::new(&config, tronbyt_api, tidbyt_client, tx, snapshot_rx);
    let snapshot = coordinator.first_refresh().await?;
    info!("✅  Discovered {} devices", snapshot.devices.len());

    let services = Services::new(coordinator, controllers);

    match cli.command {
        Commands::Run => {
            info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));
            services.coordinator().run().await;
        }
        Commands::Devices => cli::print_devices(&snapshot),
        Commands::Apps => {}
        Commands::Push(args) => services.push(args.into()).await?,
        Commands::Text(args) => services.text(args.into()).await?,
        Commands::Delete(args) => services.delete(&args.targets.into(), &args.content_id).await?,
        Commands::EnableApp(args) => {
            services
                .update_installation(&args.targets.into(), &args.content_id, InstallationAction::Enable)
                .await?
        }
        Commands::DisableApp(args) => {
            services
                .update_installation(&args.targets.into(), &args.content_id, InstallationAction::Disable)
                .await?
        }
        Commands::PinApp(args) => {
            services
                .update_installation(&args.targets.into(), &args.content_id, InstallationAction::Pin)
                .await?
        }
        Commands::UnpinApp(args) => {
            services
                .update_installation(&args.targets.into(), &args.content_id, InstallationAction::Unpin)
                .await?
        }
        Commands::Set(args) => services.set_property(&args.targets.into(), &args.property, &args.value).await?,
    }

    Ok(())
}
