use crate::domain::Installation;
use crate::domain::device::Device;
use crate::domain::events::Event;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tokio::sync::watch;
use tokio::sync::watch::{Receiver as WatchReceiver, Sender as WatchSender};
use tracing::{debug, info, instrument, warn};

/// Immutable view on the devices, published after every event.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub loaded: bool,
    pub devices: Arc<Vec<Device>>,
}

impl StoreSnapshot {
    pub fn device(&self, device_id: &str) -> Option<&Device> {
        self.devices.iter().find(|device| device.id == device_id)
    }

    pub fn device_by_name(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|device| device.name == name)
    }
}

#[derive(Debug)]
pub struct Store {
    devices: Vec<Device>,
    loaded: bool,
    rx: Receiver<Event>,
    notifier_tx: WatchSender<StoreSnapshot>,
    notifier_rx: WatchReceiver<StoreSnapshot>,
}

impl Store {
    pub fn new(rx: Receiver<Event>) -> Self {
        let (notifier_tx, notifier_rx) = watch::channel(StoreSnapshot::default());

        Store {
            devices: Vec::new(),
            loaded: false,
            rx,
            notifier_tx,
            notifier_rx,
        }
    }

    pub fn notifier(&self) -> WatchReceiver<StoreSnapshot> {
        self.notifier_rx.clone()
    }

    #[instrument(skip(self))]
    pub async fn listen(&mut self) {
        while let Some(event) = self.rx.recv().await {
            debug!("🔵 Received event: {:?}", event);
            if self.apply(event) {
                self.notifier_tx.send_replace(self.snapshot());
            }
        }
    }

    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            loaded: self.loaded,
            devices: Arc::new(self.devices.clone()),
        }
    }

    /// Applies an event, returns whether the devices changed.
    fn apply(&mut self, event: Event) -> bool {
        match event {
            Event::DevicesRefreshed(devices) => {
                let num_devices = devices.len();
                debug!("🔵 Registering {} device(s)...", num_devices);
                self.devices = devices;
                self.loaded = true;
                info!("🔵 Registering {} device(s)... OK", num_devices);
                true
            }
            Event::DeviceUpdated(device) => {
                let device_id = device.id.clone();
                let merged = merge_device(&mut self.devices, device);
                if !merged {
                    warn!(device_id, "⚠️ Received an update for unknown device '{}'", device_id);
                }
                merged
            }
            Event::InstallationUpdated { device_id, installation } => {
                let merged = merge_installation(&mut self.devices, &device_id, installation);
                if !merged {
                    warn!(device_id, "⚠️ Ignored an installation update for device '{}'", device_id);
                }
                merged
            }
        }
    }
}

/// Replaces the device with the same id. Unknown devices are ignored.
pub fn merge_device(devices: &mut [Device], updated: Device) -> bool {
    match devices.iter_mut().find(|device| device.id == updated.id) {
        Some(device) => {
            *device = updated;
            true
        }
        None => false,
    }
}

/// Replaces the installation with the same id, or appends it. Unknown devices and installations without id are ignored.
pub fn merge_installation(devices: &mut [Device], device_id: &str, installation: Installation) -> bool {
    if installation.id.is_empty() {
        return false;
    }

    let Some(device) = devices.iter_mut().find(|device| device.id == device_id) else {
        return false;
    };

    match device.installations.iter_mut().find(|existing| existing.id == installation.id) {
        Some(existing) => *existing = installation,
        None => device.installations.push(installation),
    }
    true
}
