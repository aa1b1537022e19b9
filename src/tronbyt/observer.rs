use crate::api::{ApiError, DeviceApi, map_device};
use crate::domain::Installation;
use crate::domain::device::{Device, DeviceKind};
use futures::future::join_all;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[instrument(skip(api))]
pub async fn observe(api: &DeviceApi) -> Result<Vec<Device>, ObserveError> {
    info!("Retrieving Tronbyt devices...");

    let device_gets: Vec<_> = api
        .devices()
        .await?
        .into_iter()
        .filter(|device_get| device_get.id.as_deref().is_some_and(|id| !id.is_empty()))
        .collect();

    let installations = join_all(
        device_gets
            .iter()
            .map(|device_get| fetch_installations(api, device_get.id.as_deref().unwrap_or_default())),
    )
    .await;

    let devices: Vec<Device> = device_gets
        .into_iter()
        .zip(installations)
        .filter_map(|(device_get, installations)| map_device(device_get, DeviceKind::Tronbyt, installations))
        .collect();

    info!("Retrieving Tronbyt devices... OK, {} found", devices.len());
    Ok(devices)
}

async fn fetch_installations(api: &DeviceApi, device_id: &str) -> Vec<Installation> {
    api.installations(device_id).await.unwrap_or_else(|e| {
        warn!(device_id, "⚠️ Unable to retrieve the installations: {}", e);
        Vec::new()
    })
}

#[derive(Error, Debug)]
pub enum ObserveError {
    #[error("the Tronbyt server rejected the API key")]
    InvalidApiKey,
    #[error("the Tronbyt server responded with {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("could not reach the Tronbyt server: {0}")]
    Request(#[from] reqwest::Error),
    #[error("could not decode the Tronbyt response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<ApiError> for ObserveError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status, .. } if status == StatusCode::UNAUTHORIZED => ObserveError::InvalidApiKey,
            ApiError::Status { status, body } => ObserveError::UnexpectedStatus { status, body },
            ApiError::Request(e) => ObserveError::Request(e),
            ApiError::Decode(e) => ObserveError::Decode(e),
        }
    }
}
