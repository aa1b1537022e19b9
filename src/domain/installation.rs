use serde::Deserialize;

/// An app instance installed on a device.
#[derive(PartialEq, Debug, Clone, Deserialize)]
pub struct Installation {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "appID")]
    pub app_id: Option<String>,
    pub enabled: Option<bool>,
    pub pinned: Option<bool>,
}

impl Installation {
    pub fn label(&self) -> String {
        match self.app_id.as_deref() {
            Some(app_id) if !app_id.is_empty() => format!("{}-{}", app_id, self.id),
            _ => self.id.clone(),
        }
    }

    pub fn is_pushed(&self) -> bool {
        self.app_id.as_deref() == Some("pushed")
    }
}

/// Ids of the given installations, optionally only the pushed ones.
pub fn installation_ids(installations: &[Installation], only_pushed: bool) -> Vec<String> {
    installations
        .iter()
        .filter(|installation| !installation.id.is_empty())
        .filter(|installation| !only_pushed || installation.is_pushed())
        .map(|installation| installation.id.clone())
        .collect()
}
