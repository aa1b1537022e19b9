use crate::domain::Installation;
use crate::{tidbyt, tronbyt};

pub const MANUFACTURER: &str = "Tronbyt";
const DEFAULT_MODEL: &str = "Display";

#[derive(PartialEq, Debug, Clone)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub kind: DeviceKind,
    pub r#type: Option<String>,
    pub notes: Option<String>,
    pub interval: Option<u64>,
    pub brightness: Option<u64>,
    pub auto_dim: Option<bool>,
    pub night_mode: NightMode,
    pub dim_mode: DimMode,
    pub pinned_app: Option<String>,
    pub installations: Vec<Installation>,
    pub info: DeviceInfo,
}

impl Device {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: DeviceKind) -> Self {
        Device {
            id: id.into(),
            name: name.into(),
            kind,
            r#type: None,
            notes: None,
            interval: None,
            brightness: None,
            auto_dim: None,
            night_mode: NightMode::default(),
            dim_mode: DimMode::default(),
            pinned_app: None,
            installations: Vec::new(),
            info: DeviceInfo::default(),
        }
    }

    pub fn model(&self) -> &str {
        self.r#type.as_deref().filter(|model| !model.is_empty()).unwrap_or(DEFAULT_MODEL)
    }
}

/// The backend that owns a device, which is also the id of its controller.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum DeviceKind {
    Tronbyt,
    Tidbyt,
}

impl DeviceKind {
    pub fn controller_id(&self) -> &'static str {
        match self {
            DeviceKind::Tronbyt => tronbyt::CONTROLLER_ID,
            DeviceKind::Tidbyt => tidbyt::CONTROLLER_ID,
        }
    }
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct NightMode {
    pub enabled: Option<bool>,
    pub app: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub brightness: Option<u64>,
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct DimMode {
    pub start: Option<String>,
    pub brightness: Option<u64>,
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct DeviceInfo {
    pub firmware_version: Option<String>,
    pub firmware_type: Option<String>,
    mac_address: Option<String>,
}

impl DeviceInfo {
    pub fn new(firmware_version: Option<String>, firmware_type: Option<String>, mac_address: Option<String>) -> Self {
        DeviceInfo {
            firmware_version: firmware_version.filter(|v| !v.is_empty()),
            firmware_type: firmware_type.filter(|v| !v.is_empty()),
            mac_address: mac_address.filter(|v| !v.is_empty()).map(|mac| mac.to_lowercase()),
        }
    }

    pub fn mac_address(&self) -> Option<&str> {
        self.mac_address.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn model_falls_back_to_display() {
        let mut device = Device::new("dev1", "Living Room", DeviceKind::Tronbyt);
        assert_eq!(device.model(), "Display");

        device.r#type = Some("tronbyt_s3".to_string());
        assert_eq!(device.model(), "tronbyt_s3");
    }

    #[test]
    fn device_info_lowercases_the_mac_address() {
        let info = DeviceInfo::new(Some("1.4.2".to_string()), Some(String::new()), Some("AA:BB:CC:00:11:22".to_string()));

        assert_eq!(info.mac_address(), Some("aa:bb:cc:00:11:22"));
        assert_eq!(info.firmware_version.as_deref(), Some("1.4.2"));
        assert_eq!(info.firmware_type, None);
    }
}
