use crate::api::DeviceApi;
use crate::app_config::TidbytDevice;
use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

/// Shared by all Tidbyt devices, each device authenticates with its own token.
pub fn new_client() -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder().default_headers(headers).build()
}

pub fn device_api(client: &Client, device: &TidbytDevice) -> DeviceApi {
    DeviceApi::new(client.clone(), device.api_url()).with_token(device.token())
}
