use crate::domain::device::Device;
use crate::domain::property_value::PropertyValue;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug)]
pub enum Command {
    PushApp {
        device: Device,
        push: PushApp,
    },
    DeleteInstallation {
        device: Device,
        installation_id: String,
    },
    UpdateInstallation {
        device: Device,
        installation_id: String,
        patch: Map<String, Value>,
    },
    ControlDevice {
        device: Device,
        property: Arc<HashMap<String, PropertyValue>>,
    },
}

impl Command {
    pub fn device(&self) -> &Device {
        match self {
            Command::PushApp { device, .. }
            | Command::DeleteInstallation { device, .. }
            | Command::UpdateInstallation { device, .. }
            | Command::ControlDevice { device, .. } => device,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::PushApp { .. } => "push app",
            Command::DeleteInstallation { .. } => "delete installation",
            Command::UpdateInstallation { .. } => "update installation",
            Command::ControlDevice { .. } => "control device",
        }
    }
}

/// Content to render and show on a device.
#[derive(PartialEq, Debug, Clone)]
pub struct PushApp {
    pub app_id: String,
    pub installation_id: String,
    pub content_type: ContentType,
    pub text_type: Option<TextType>,
    pub publish: Option<PublishType>,
    pub config: BTreeMap<String, String>,
}

#[derive(PartialEq, Debug, Clone, Copy, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Builtin,
    Custom,
}

#[derive(PartialEq, Debug, Clone, Copy, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    Scroll,
    Title,
}

impl Display for TextType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TextType::Scroll => write!(f, "scroll"),
            TextType::Title => write!(f, "title"),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Copy, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PublishType {
    Foreground,
    Background,
}
