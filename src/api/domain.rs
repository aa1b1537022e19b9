use crate::domain::Installation;
use crate::domain::commands::PublishType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<DeviceGet>,
}

// Numbers are floats because some servers serialize them that way
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGet {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub r#type: Option<String>,
    pub notes: Option<String>,
    pub interval_sec: Option<f64>,
    pub brightness: Option<f64>,
    pub auto_dim: Option<bool>,
    pub night_mode: Option<NightModeGet>,
    pub dim_mode: Option<DimModeGet>,
    pub pinned_app: Option<String>,
    pub info: Option<InfoGet>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NightModeGet {
    pub enabled: Option<bool>,
    pub app: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub brightness: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DimModeGet {
    pub start_time: Option<String>,
    pub brightness: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct InfoGet {
    #[serde(alias = "firmwareVersion")]
    pub firmware_version: Option<String>,
    #[serde(alias = "firmwareType")]
    pub firmware_type: Option<String>,
    #[serde(alias = "macAddress")]
    pub mac_address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InstallationsResponse {
    #[serde(default)]
    pub installations: Vec<Installation>,
}

#[derive(PartialEq, Debug, Serialize)]
pub struct PushAppRequest<'a> {
    pub config: &'a BTreeMap<String, String>,
    pub app_id: &'a str,
    #[serde(rename = "installationID")]
    pub installation_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish: Option<PublishType>,
}
