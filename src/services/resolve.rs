use crate::domain::device::Device;
use crate::services::ServiceError;
use crate::store::StoreSnapshot;
use std::collections::HashSet;

/// Devices a service call applies to, by id and by name.
#[derive(Debug, Default, Clone)]
pub struct Targets {
    pub device_ids: Vec<String>,
    pub device_names: Vec<String>,
}

#[cfg(test)]
impl Targets {
    pub fn by_name(device_names: Vec<String>) -> Self {
        Targets {
            device_ids: Vec::new(),
            device_names,
        }
    }
}

/// Resolves ids first, then names, keeping every device once.
pub fn resolve_targets(snapshot: &StoreSnapshot, targets: &Targets) -> Result<Vec<Device>, ServiceError> {
    if snapshot.devices.is_empty() {
        return Err(ServiceError::NoDevicesLoaded);
    }

    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for device_id in &targets.device_ids {
        let device = snapshot
            .device(device_id)
            .ok_or_else(|| ServiceError::UnknownDeviceId(device_id.clone()))?;
        if seen.insert(device.id.clone()) {
            resolved.push(device.clone());
        }
    }

    for name in &targets.device_names {
        let device = snapshot
            .device_by_name(name)
            .ok_or_else(|| ServiceError::UnknownDeviceName(name.clone()))?;
        if seen.insert(device.id.clone()) {
            resolved.push(device.clone());
        }
    }

    if resolved.is_empty() {
        return Err(ServiceError::NoTargets);
    }

    Ok(resolved)
}
