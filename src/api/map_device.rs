use crate::api::DeviceGet;
use crate::domain::Installation;
use crate::domain::device::{Device, DeviceInfo, DeviceKind, DimMode, NightMode};

/// Maps an API device onto the domain, `None` when the device has no id.
pub fn map_device(device_get: DeviceGet, kind: DeviceKind, installations: Vec<Installation>) -> Option<Device> {
    let id = device_get.id.filter(|id| !id.is_empty())?;
    let name = device_get.display_name.filter(|name| !name.is_empty()).unwrap_or_else(|| id.clone());
    let night_mode = device_get.night_mode.unwrap_or_default();
    let dim_mode = device_get.dim_mode.unwrap_or_default();
    let info = device_get.info.unwrap_or_default();

    Some(Device {
        id,
        name,
        kind,
        r#type: device_get.r#type,
        notes: device_get.notes,
        interval: device_get.interval_sec.map(round),
        brightness: device_get.brightness.map(round),
        auto_dim: device_get.auto_dim,
        night_mode: NightMode {
            enabled: night_mode.enabled,
            app: night_mode.app,
            start: night_mode.start_time,
            end: night_mode.end_time,
            brightness: night_mode.brightness.map(round),
        },
        dim_mode: DimMode {
            start: dim_mode.start_time,
            brightness: dim_mode.brightness.map(round),
        },
        pinned_app: device_get.pinned_app,
        installations,
        info: DeviceInfo::new(info.firmware_version, info.firmware_type, info.mac_address),
    })
}

fn round(value: f64) -> u64 {
    value.round().max(0.0) as u64
}
