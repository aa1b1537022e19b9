use crate::api::DeviceApi;
use crate::app_config::{AppConfig, TidbytDevice};
use crate::domain::controller::CommandOutcome;
use crate::domain::events::Event;
use crate::store::StoreSnapshot;
use crate::tronbyt::ObserveError;
use crate::{tidbyt, tronbyt};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tokio::signal;
use tokio::sync::mpsc::Sender;
use tokio::sync::watch::Receiver;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

/// Polls all backends and feeds the results into the store.
#[derive(Debug)]
pub struct Coordinator {
    tronbyt: Option<DeviceApi>,
    tidbyt_client: Client,
    tidbyt_devices: Vec<TidbytDevice>,
    poll_interval: Duration,
    tx: Sender<Event>,
    snapshot_rx: Receiver<StoreSnapshot>,
}

impl Coordinator {
    pub fn new(config: &AppConfig, tronbyt: Option<DeviceApi>, tidbyt_client: Client, tx: Sender<Event>, snapshot_rx: Receiver<StoreSnapshot>) -> Self {
        Coordinator {
            tronbyt,
            tidbyt_client,
            tidbyt_devices: config.tidbyt_devices().to_vec(),
            poll_interval: config.core().poll_interval(),
            tx,
            snapshot_rx,
        }
    }

    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), CoordinatorError> {
        let mut devices = Vec::new();
        if let Some(api) = &self.tronbyt {
            devices.extend(tronbyt::observe(api).await?);
        }
        if !self.tidbyt_devices.is_empty() {
            devices.extend(tidbyt::observe(&self.tidbyt_client, &self.tidbyt_devices).await);
        }

        if devices.is_empty() {
            return Err(CoordinatorError::NoDevices);
        }

        self.send(Event::DevicesRefreshed(devices)).await
    }

    /// Refreshes and waits until the store has published the result.
    pub async fn first_refresh(&self) -> Result<StoreSnapshot, CoordinatorError> {
        self.refresh().await?;

        let mut rx = self.snapshot_rx.clone();
        let snapshot = rx
            .wait_for(|snapshot| snapshot.loaded)
            .await
            .map_err(|_| CoordinatorError::StoreClosed)?
            .clone();
        Ok(snapshot)
    }

    /// Refresh after a service call. Failures are only logged.
    pub async fn request_refresh(&self) {
        if let Err(e) = self.refresh().await {
            warn!("⚠️ Unable to refresh the devices: {}", e);
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Hands the state changes of a command to the store.
    pub async fn apply(&self, outcome: CommandOutcome) -> Result<(), CoordinatorError> {
        match outcome {
            CommandOutcome::Done => Ok(()),
            CommandOutcome::DeviceUpdated(device) => self.send(Event::DeviceUpdated(device)).await,
            CommandOutcome::InstallationUpdated { device_id, installation } => {
                self.send(Event::InstallationUpdated { device_id, installation }).await
            }
        }
    }

    /// Polls until ctrl-c is pressed.
    #[instrument(skip(self))]
    pub async fn run(&self) {
        let mut interval = tokio::time::interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("🔁 Polling devices every {:?}", self.poll_interval);

        let ctrl_c = signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    debug!("Polling devices...");
                    if let Err(e) = self.refresh().await {
                        warn!("⚠️ Unable to poll the devices: {}", e);
                    }
                }
                _ = &mut ctrl_c => {
                    info!("🛑 Stopping");
                    break;
                }
            }
        }
    }

    async fn send(&self, event: Event) -> Result<(), CoordinatorError> {
        self.tx.send(event).await.map_err(|_| CoordinatorError::StoreClosed)
    }
}

#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error(transparent)]
    Observe(#[from] ObserveError),
    #[error("no Tronbyt or Tidbyt devices found")]
    NoDevices,
    #[error("the store is no longer running")]
    StoreClosed,
}
