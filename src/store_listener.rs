use crate::domain::device::Device;
use crate::properties::map_properties;
use crate::store::StoreSnapshot;
use std::collections::BTreeMap;
use tokio::sync::watch::Receiver;
use tracing::{info, instrument};

#[instrument(skip_all)]
pub async fn store_listener(mut rx: Receiver<StoreSnapshot>) {
    let mut previous: StoreSnapshot = rx.borrow_and_update().clone();
    while rx.changed().await.is_ok() {
        let snapshot: StoreSnapshot = rx.borrow_and_update().clone();
        for change in diff_snapshots(&previous, &snapshot) {
            match change {
                Change::DeviceAdded { device } => info!("🆕 Found device '{}'", device),
                Change::DeviceRemoved { device } => info!("👋 Device '{}' is gone", device),
                Change::PropertyChanged {
                    device,
                    property,
                    from,
                    to,
                } => info!("🟢 Device '{}' changed '{}' to '{}', was '{}'", device, property, to, from),
            }
        }
        previous = snapshot;
    }
}

#[derive(PartialEq, Debug)]
pub enum Change {
    DeviceAdded {
        device: String,
    },
    DeviceRemoved {
        device: String,
    },
    PropertyChanged {
        device: String,
        property: String,
        from: String,
        to: String,
    },
}

/// Lists the devices and property values that differ between two snapshots.
pub fn diff_snapshots(previous: &StoreSnapshot, current: &StoreSnapshot) -> Vec<Change> {
    let mut changes = Vec::new();

    for device in current.devices.iter() {
        match previous.device(&device.id) {
            None => changes.push(Change::DeviceAdded {
                device: device.name.clone(),
            }),
            Some(previous_device) => {
                let before = property_values(previous_device);
                for (label, to) in property_values(device) {
                    let from = before.get(&label).cloned().unwrap_or_else(|| "unknown".to_string());
                    if from != to {
                        changes.push(Change::PropertyChanged {
                            device: device.name.clone(),
                            property: label,
                            from,
                            to,
                        });
                    }
                }
            }
        }
    }

    changes.extend(
        previous
            .devices
            .iter()
            .filter(|device| current.device(&device.id).is_none())
            .map(|device| Change::DeviceRemoved {
                device: device.name.clone(),
            }),
    );

    changes
}

fn property_values(device: &Device) -> BTreeMap<String, String> {
    map_properties(device)
        .iter()
        .map(|property| (property.label(), property.value_string()))
        .collect()
}
