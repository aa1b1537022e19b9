use crate::addon::AddonError;
use crate::api::ApiError;
use crate::domain::Installation;
use crate::domain::commands::Command;
use crate::domain::device::Device;
use crate::domain::property::PropertyError;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use thiserror::Error;

#[async_trait]
pub trait Controller: Debug + Send + Sync {
    fn id(&self) -> &'static str;

    async fn execute(&self, command: Command) -> Result<CommandOutcome, ControllerError>;

    /// Ids of the installations on a device, optionally only the pushed ones.
    async fn installation_ids(&self, device: &Device, only_pushed: bool) -> Result<Vec<String>, ControllerError>;
}

/// State changes the store must apply after a command succeeded.
#[derive(PartialEq, Debug)]
pub enum CommandOutcome {
    Done,
    DeviceUpdated(Device),
    InstallationUpdated { device_id: String, installation: Installation },
}

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{body}")]
    Status { status: StatusCode, body: String },
    #[error("could not decode the response: {0}")]
    Decode(serde_json::Error),
    #[error(transparent)]
    Addon(#[from] AddonError),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error("device '{device}' has no property '{property}'")]
    UnknownProperty { device: String, property: String },
    #[error("{controller} devices do not support '{command}'")]
    Unsupported { controller: &'static str, command: &'static str },
    #[error("{0}")]
    Misconfigured(String),
}

impl From<ApiError> for ControllerError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Request(e) => ControllerError::Request(e),
            ApiError::Status { status, body } => ControllerError::Status { status, body },
            ApiError::Decode(e) => ControllerError::Decode(e),
        }
    }
}
