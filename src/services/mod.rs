mod arguments;
mod delete;
mod installation;
mod push;
mod resolve;
mod set;

pub use arguments::parse_arguments;
pub use delete::validate_content_id;
pub use installation::InstallationAction;
pub use push::{PushRequest, TextRequest};
pub use resolve::{Targets, resolve_targets};

use crate::coordinator::Coordinator;
use crate::domain::commands::Command;
use crate::domain::controller::{Controller, ControllerError};
use crate::domain::controller_registry::ControllerRegistry;
use crate::domain::device::Device;
use crate::domain::property::PropertyError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};

/// Service calls on the loaded devices. Every successful call asks the coordinator to refresh.
#[derive(Debug)]
pub struct Services {
    coordinator: Coordinator,
    controllers: ControllerRegistry,
}

impl Services {
    pub fn new(coordinator: Coordinator, controllers: ControllerRegistry) -> Self {
        Services { coordinator, controllers }
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    fn resolve(&self, targets: &Targets) -> Result<Vec<Device>, ServiceError> {
        resolve_targets(&self.coordinator.snapshot(), targets)
    }

    fn controller(&self, device: &Device) -> Result<Arc<dyn Controller>, ServiceError> {
        let controller_id = device.kind.controller_id();
        self.controllers.get(controller_id).ok_or(ServiceError::NoController(controller_id))
    }

    async fn execute(&self, command: Command) -> Result<(), ServiceError> {
        let controller = self.controller(command.device())?;
        let outcome = controller.execute(command).await?;
        if let Err(e) = self.coordinator.apply(outcome).await {
            warn!("⚠️ Unable to update the store: {}", e);
        }
        Ok(())
    }

    /// Fails unless the content id is one of the installations on the device.
    async fn ensure_installed(&self, device: &Device, content_id: &str, only_pushed: bool) -> Result<(), ServiceError> {
        let installed = self
            .controller(device)?
            .installation_ids(device, only_pushed)
            .await
            .inspect_err(|e| error!(device_id = device.id, "❌ Unable to list the installed apps of '{}': {}", device.name, e))?;
        if installed.iter().any(|id| id == content_id) {
            return Ok(());
        }

        let error = ServiceError::NotInstalled {
            device: device.name.clone(),
            installed,
        };
        error!(device_id = device.id, "❌ {}", error);
        Err(error)
    }
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("No Tronbyt devices are loaded. Reload the integration.")]
    NoDevicesLoaded,
    #[error("Tronbyt device with id {0} is not available.")]
    UnknownDeviceId(String),
    #[error("{0} is not a known Tronbyt device.")]
    UnknownDeviceName(String),
    #[error("You must select at least one Tronbyt device.")]
    NoTargets,
    #[error("Arguments must be provided as key=value pairs separated by ';'")]
    InvalidArguments,
    #[error("Content ID must contain characters A-Z, a-z or 0-9")]
    InvalidContentId,
    #[error("The Content ID you entered is not an installed app on {device}. Currently installed apps are: {installed:?}")]
    NotInstalled { device: String, installed: Vec<String> },
    #[error("'{0}' is required for this content type")]
    MissingContent(&'static str),
    #[error("'{device}' has no property '{property}'")]
    UnknownProperty { device: String, property: String },
    #[error("no controller is registered for {0} devices")]
    NoController(&'static str),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error(transparent)]
    Controller(#[from] ControllerError),
}
