use crate::api::map_device;
use crate::app_config::TidbytDevice;
use crate::domain::device::{Device, DeviceKind};
use crate::tidbyt::device_api;
use futures::future::join_all;
use reqwest::Client;
use tracing::{info, instrument, warn};

/// Retrieves the state of the configured Tidbyt devices. Devices that cannot be reached keep an unknown state.
#[instrument(skip_all)]
pub async fn observe(client: &Client, devices: &[TidbytDevice]) -> Vec<Device> {
    info!("Retrieving Tidbyt devices...");

    let devices = join_all(devices.iter().map(|device| observe_device(client, device))).await;

    info!("Retrieving Tidbyt devices... OK, {} found", devices.len());
    devices
}

async fn observe_device(client: &Client, config: &TidbytDevice) -> Device {
    match device_api(client, config).device(config.id()).await {
        Ok(mut device_get) => {
            let display_name = device_get.display_name.take().filter(|name| !name.is_empty());
            device_get.id = Some(config.id().to_string());
            let name = config.name().map(str::to_string).or(display_name).unwrap_or_else(|| config.id().to_string());

            map_device(device_get, DeviceKind::Tidbyt, Vec::new())
                .map(|device| Device { name, ..device })
                .unwrap_or_else(|| unknown_device(config))
        }
        Err(e) => {
            warn!(device_id = config.id(), "⚠️ Unable to retrieve the Tidbyt device: {}", e);
            unknown_device(config)
        }
    }
}

fn unknown_device(config: &TidbytDevice) -> Device {
    Device::new(config.id(), config.name().unwrap_or(config.id()), DeviceKind::Tidbyt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use pretty_assertions::assert_eq;

    #[test_log::test(tokio::test)]
    async fn observe_reads_the_state_of_each_device() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v0/devices/kitchen-device-id-sparkly")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/tidbyt_device_response.json"))
            .match_header("authorization", "Bearer tidbyt-token")
            .create_async()
            .await;

        let config = AppConfigBuilder::new()
            .tidbyt_device(None, "kitchen-device-id-sparkly", server.url())
            .build();
        let devices = observe(&Client::new(), config.tidbyt_devices()).await;

        mock.assert_async().await;
        let mut expected = Device::new("kitchen-device-id-sparkly", "Kitchen", DeviceKind::Tidbyt);
        expected.brightness = Some(65);
        expected.auto_dim = Some(true);
        assert_eq!(devices, vec![expected]);
    }

    #[tokio::test]
    async fn observe_prefers_the_configured_name() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v0/devices/kitchen-device-id-sparkly")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(include_str!("../../tests/resources/tidbyt_device_response.json"))
            .create_async()
            .await;

        let config = AppConfigBuilder::new()
            .tidbyt_device(Some("Hallway"), "kitchen-device-id-sparkly", server.url())
            .build();
        let devices = observe(&Client::new(), config.tidbyt_devices()).await;

        assert_eq!(devices[0].name, "Hallway");
    }

    #[tokio::test]
    async fn an_unreachable_device_has_an_unknown_state() {
        let mut server = mockito::Server::new_async().await;
        server.mock("GET", "/v0/devices/office").with_status(500).create_async().await;

        let config = AppConfigBuilder::new().tidbyt_device(None, "office", server.url()).build();
        let devices = observe(&Client::new(), config.tidbyt_devices()).await;

        assert_eq!(devices, vec![Device::new("office", "office", DeviceKind::Tidbyt)]);
    }
}
