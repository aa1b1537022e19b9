use crate::api::{DeviceApi, PushAppRequest, map_device};
use crate::domain::commands::Command;
use crate::domain::controller::{CommandOutcome, Controller, ControllerError};
use crate::domain::device::{Device, DeviceKind};
use crate::domain::installation_ids;
use crate::properties::build_patches;
use async_trait::async_trait;
use tracing::{error, info, instrument};

pub const CONTROLLER_ID: &str = "tronbyt";

#[derive(Debug)]
pub struct TronbytController {
    api: DeviceApi,
}

#[async_trait]
impl Controller for TronbytController {
    fn id(&self) -> &'static str {
        CONTROLLER_ID
    }

    #[instrument(skip_all, fields(command = command.name(), device_id = %command.device().id))]
    async fn execute(&self, command: Command) -> Result<CommandOutcome, ControllerError> {
        let command_name = command.name();
        let device_name = command.device().name.clone();

        self.dispatch(command)
            .await
            .inspect_err(|e| error!("❌ Unable to {} on '{}': {}", command_name, device_name, e))
    }

    async fn installation_ids(&self, device: &Device, only_pushed: bool) -> Result<Vec<String>, ControllerError> {
        let installations = self.api.installations(&device.id).await?;
        Ok(installation_ids(&installations, only_pushed))
    }
}

impl TronbytController {
    pub fn new(api: DeviceApi) -> Self {
        TronbytController { api }
    }

    async fn dispatch(&self, command: Command) -> Result<CommandOutcome, ControllerError> {
        match command {
            Command::PushApp { device, push } => {
                info!(device_id = device.id, "📤 Pushing '{}' to '{}'", push.app_id, device.name);
                let request = PushAppRequest {
                    config: &push.config,
                    app_id: &push.app_id,
                    installation_id: &push.installation_id,
                    publish: push.publish,
                };
                self.api.push_app(&device.id, &request).await?;
                Ok(CommandOutcome::Done)
            }
            Command::DeleteInstallation { device, installation_id } => {
                info!(device_id = device.id, "🗑️ Deleting '{}' from '{}'", installation_id, device.name);
                self.api.delete_installation(&device.id, &installation_id).await?;
                Ok(CommandOutcome::Done)
            }
            Command::UpdateInstallation {
                device,
                installation_id,
                patch,
            } => {
                info!(device_id = device.id, ?patch, "🟢 Updating '{}' on '{}'", installation_id, device.name);
                let installation = self.api.patch_installation(&device.id, &installation_id, &patch).await?;
                Ok(CommandOutcome::InstallationUpdated {
                    device_id: device.id,
                    installation,
                })
            }
            Command::ControlDevice { device, property } => {
                let patches = build_patches(&device, &property)?;
                info!(device_id = device.id, ?patches, "🟢 Updating '{}'", device.name);

                let device_id = device.id.clone();
                let mut updated = if patches.device.is_empty() {
                    device
                } else {
                    let mut device_get = self.api.patch_device(&device_id, &patches.device).await?;
                    device_get.id = Some(device_id.clone());
                    map_device(device_get, DeviceKind::Tronbyt, Vec::new()).unwrap_or(device)
                };

                for (installation_id, patch) in &patches.installations {
                    self.api.patch_installation(&device_id, installation_id, patch).await?;
                }

                updated.installations = self.api.installations(&device_id).await?;
                Ok(CommandOutcome::DeviceUpdated(updated))
            }
        }
    }
}
