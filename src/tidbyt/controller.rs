use crate::addon::{AddonClient, AddonPush};
use crate::api::PushAppRequest;
use crate::app_config::{DEFAULT_TIDBYT_API_URL, TidbytDevice};
use crate::domain::commands::Command;
use crate::domain::controller::{CommandOutcome, Controller, ControllerError};
use crate::domain::device::Device;
use crate::domain::installation_ids;
use crate::domain::property_value::PropertyValue;
use crate::properties::build_patches;
use crate::tidbyt::device_api;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info, instrument};

pub const CONTROLLER_ID: &str = "tidbyt";

#[derive(Debug)]
pub struct TidbytController {
    client: Client,
    devices: Vec<TidbytDevice>,
    addon: Option<AddonClient>,
}

#[async_trait]
impl Controller for TidbytController {
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
        let config = self.config(device)?;
        let installations = device_api(&self.client, config).installations(config.id()).await?;
        Ok(installation_ids(&installations, only_pushed))
    }
}

impl TidbytController {
    pub fn new(client: Client, devices: Vec<TidbytDevice>, addon: Option<AddonClient>) -> Self {
        TidbytController { client, devices, addon }
    }

    fn config(&self, device: &Device) -> Result<&TidbytDevice, ControllerError> {
        self.devices
            .iter()
            .find(|config| config.id() == device.id)
            .ok_or_else(|| ControllerError::Misconfigured(format!("'{}' is not a configured Tidbyt device", device.id)))
    }

    async fn dispatch(&self, command: Command) -> Result<CommandOutcome, ControllerError> {
        match command {
            Command::PushApp { device, push } => {
                let config = self.config(&device)?;
                if config.is_tronbyt() {
                    info!(device_id = device.id, "📤 Pushing '{}' to '{}'", push.app_id, device.name);
                    let request = PushAppRequest {
                        config: &push.config,
                        app_id: &push.app_id,
                        installation_id: &push.installation_id,
                        publish: push.publish,
                    };
                    device_api(&self.client, config).push_app(config.id(), &request).await?;
                    return Ok(CommandOutcome::Done);
                }

                let addon = self
                    .addon
                    .as_ref()
                    .ok_or_else(|| ControllerError::Misconfigured("pushing to Tidbyt devices requires an [addon] section".to_string()))?;

                info!(device_id = device.id, "📤 Pushing '{}' to '{}' through the add-on", push.app_id, device.name);
                let request = AddonPush {
                    content: &push.app_id,
                    contentid: &push.installation_id,
                    contenttype: push.content_type,
                    publishtype: push.publish,
                    token: config.token(),
                    deviceid: config.id(),
                    starargs: &push.config,
                    texttype: push.text_type,
                    base_url: Some(config.api_url()).filter(|url| *url != DEFAULT_TIDBYT_API_URL),
                };
                addon.push(&request).await?;
                Ok(CommandOutcome::Done)
            }
            Command::DeleteInstallation { device, installation_id } => {
                let config = self.config(&device)?;
                info!(device_id = device.id, "🗑️ Deleting '{}' from '{}'", installation_id, device.name);
                device_api(&self.client, config).delete_installation(config.id(), &installation_id).await?;
                Ok(CommandOutcome::Done)
            }
            Command::UpdateInstallation {
                device,
                installation_id,
                patch,
            } => {
                let config = self.config(&device)?;
                if !config.is_tronbyt() {
                    return Err(ControllerError::Misconfigured(format!("{} is not configured as a Tronbyt device.", device.name)));
                }

                info!(device_id = device.id, ?patch, "🟢 Updating '{}' on '{}'", installation_id, device.name);
                let installation = device_api(&self.client, config)
                    .patch_installation(config.id(), &installation_id, &patch)
                    .await?;
                Ok(CommandOutcome::InstallationUpdated {
                    device_id: device.id,
                    installation,
                })
            }
            Command::ControlDevice { device, property } => {
                if property.values().any(|value| *value == PropertyValue::TurnOff) {
                    return Err(ControllerError::Unsupported {
                        controller: "Tidbyt",
                        command: "turn off",
                    });
                }

                let config = self.config(&device)?;
                let patches = build_patches(&device, &property)?;
                info!(device_id = device.id, ?patches, "🟢 Updating '{}'", device.name);
                device_api(&self.client, config).update_device(config.id(), &patches.device).await?;

                let mut updated = device;
                if let Some(brightness) = patches.device.get("brightness").and_then(|value| value.as_u64()) {
                    updated.brightness = Some(brightness);
                }
                if let Some(auto_dim) = patches.device.get("autoDim").and_then(|value| value.as_bool()) {
                    updated.auto_dim = Some(auto_dim);
                }
                Ok(CommandOutcome::DeviceUpdated(updated))
            }
        }
    }
}
